// ==========================================
// Motor de Cronogramas - Cronograma persistido
// ==========================================
// Cronograma: cabeçalho do plano de estudo gerado.
// CronogramaItem: alocação de uma aula em uma semana.
// O item é um retrato do cálculo; o progresso do aluno
// (concluido) evolui depois, sem recalcular o plano.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::calendario::PeriodoFerias;
use crate::domain::types::ModalidadeEstudo;

/// Nome atribuído quando o aluno não informa um.
pub const NOME_CRONOGRAMA_PADRAO: &str = "Meu Cronograma";

// ==========================================
// Cronograma - cabeçalho
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cronograma {
    pub id: String,
    pub aluno_id: String,
    pub curso_alvo_id: Option<String>,
    pub nome: String,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub dias_estudo_semana: i32,
    pub horas_estudo_dia: f64,
    pub periodos_ferias: Vec<PeriodoFerias>,
    pub prioridade_minima: i32, // valor efetivo aplicado (>= 1)
    pub modalidade_estudo: ModalidadeEstudo,
    pub disciplinas_selecionadas: Vec<String>,
    pub ordem_frentes_preferencia: Option<Vec<String>>,
    pub modulos_selecionados: Option<Vec<String>>,
    pub excluir_aulas_concluidas: bool,
    pub created_at: NaiveDateTime,
}

// ==========================================
// CronogramaItem - alocação aula -> semana
// ==========================================
// Invariante: semana_numero sempre aponta para uma
// semana útil; ordem_na_semana é 1-based e contígua
// dentro da semana.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronogramaItem {
    pub id: String,
    pub cronograma_id: String,
    pub aula_id: String,
    pub semana_numero: i32,
    pub ordem_na_semana: i32,
    pub concluido: bool,
}

// ==========================================
// CronogramaItemDetalhado - item com dados da aula
// ==========================================
// Resultado da consulta com join em aulas; é a forma
// devolvida ao cliente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronogramaItemDetalhado {
    pub id: String,
    pub aula_id: String,
    pub semana_numero: i32,
    pub ordem_na_semana: i32,
    pub concluido: bool,
    pub aula_nome: String,
    pub numero_aula: Option<i32>,
    pub tempo_estimado_minutos: Option<i32>,
}

// ==========================================
// CronogramaCompleto - cabeçalho + itens
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronogramaCompleto {
    #[serde(flatten)]
    pub cronograma: Cronograma,
    pub itens: Vec<CronogramaItemDetalhado>,
}

// ==========================================
// Estatisticas - resumo da geração
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estatisticas {
    pub total_aulas: usize,
    pub total_semanas: usize,
    pub semanas_uteis: usize,
    pub capacidade_total_minutos: f64,
    pub custo_total_minutos: f64,
    pub frentes_distribuidas: usize,
}
