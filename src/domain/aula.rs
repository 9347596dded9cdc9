// ==========================================
// Motor de Cronogramas - Aula e Frente
// ==========================================
// Aula: unidade de conteúdo a alocar.
// Frente: agrupamento de aulas de um mesmo eixo
// temático, unidade de distribuição.
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// Aula - unidade de conteúdo
// ==========================================
// Os campos de módulo/frente/disciplina chegam
// desnormalizados da consulta ao catálogo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aula {
    pub id: String,
    pub nome: String,
    pub numero_aula: Option<i32>,           // ordem dentro do módulo
    pub tempo_estimado_minutos: Option<i32>, // estimativa de autoria, pode faltar
    pub prioridade: i32,

    pub modulo_id: String,
    pub modulo_nome: String,
    pub numero_modulo: Option<i32>,

    pub frente_id: String,
    pub frente_nome: String,

    pub disciplina_id: String,
    pub disciplina_nome: String,
}

/// Ordena o conjunto candidato na ordem canônica:
/// disciplina > frente > número do módulo > número da aula.
///
/// Nomes comparados lexicograficamente; números de sequência
/// ausentes contam como 0.
pub fn ordenar_aulas(aulas: &mut [Aula]) {
    aulas.sort_by(|a, b| {
        match a.disciplina_nome.cmp(&b.disciplina_nome) {
            Ordering::Equal => {}
            outro => return outro,
        }
        match a.frente_nome.cmp(&b.frente_nome) {
            Ordering::Equal => {}
            outro => return outro,
        }
        match a.numero_modulo.unwrap_or(0).cmp(&b.numero_modulo.unwrap_or(0)) {
            Ordering::Equal => {}
            outro => return outro,
        }
        a.numero_aula.unwrap_or(0).cmp(&b.numero_aula.unwrap_or(0))
    });
}

// ==========================================
// AulaComCusto - aula com custo efetivo
// ==========================================
// Derivada pelo CustoEngine; custo sempre estritamente
// positivo e mantido fracionário em memória.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AulaComCusto {
    #[serde(flatten)]
    pub aula: Aula,
    pub custo: f64,
}

// ==========================================
// Frente - eixo temático
// ==========================================
// Derivada da lista ordenada de aulas com custo;
// somente leitura durante a distribuição.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frente {
    pub frente_id: String,
    pub frente_nome: String,
    pub aulas: Vec<AulaComCusto>, // na ordem canônica, nunca reordenadas
    pub custo_total: f64,
    pub peso: f64, // custo_total / custo geral (somente modalidade paralela)
}
