// ==========================================
// Motor de Cronogramas - Verificador de viabilidade
// ==========================================
// Porta de corte: compara o custo total do conteúdo com a
// capacidade total das semanas úteis. Em caso de déficit,
// produz os números de remediação que o cliente apresenta
// ("você precisa de X h/dia, configurou Y h/dia").
// O distribuidor nunca roda sobre entrada inviável.
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// DetalhesInviabilidade - relatório de déficit
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetalhesInviabilidade {
    pub horas_necessarias: i64,      // ceil(custo_total / 60)
    pub horas_disponiveis: i64,      // ceil(capacidade_total / 60)
    pub horas_dia_necessarias: f64,  // arredondado para cima em 1 casa decimal
    pub horas_dia_atual: f64,        // o que o aluno configurou
}

// ==========================================
// Viabilidade - resultado da verificação
// ==========================================
// Inviavel é um resultado terminal de primeira classe,
// distinto tanto de sucesso quanto de erro.
#[derive(Debug, Clone, PartialEq)]
pub enum Viabilidade {
    Viavel,
    Inviavel(DetalhesInviabilidade),
}

// ==========================================
// ViabilidadeEngine
// ==========================================
pub struct ViabilidadeEngine {
    // engine sem estado
}

impl ViabilidadeEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Verifica se o conteúdo cabe na capacidade disponível.
    ///
    /// Inviável quando `custo_total > capacidade_total`. O campo
    /// `horas_dia_necessarias` divide por `semanas_uteis * dias_semana`;
    /// a fronteira da API garante ao menos uma semana útil e
    /// `dias_semana >= 1` antes de chamar este engine.
    ///
    /// # Parâmetros
    /// - `custo_total`, `capacidade_total`: minutos (fracionários)
    /// - `semanas_uteis`: quantidade de semanas fora de férias
    /// - `dias_semana`, `horas_dia`: parâmetros solicitados pelo aluno
    #[instrument(skip(self))]
    pub fn verificar(
        &self,
        custo_total: f64,
        capacidade_total: f64,
        semanas_uteis: usize,
        dias_semana: i32,
        horas_dia: f64,
    ) -> Viabilidade {
        if custo_total <= capacidade_total {
            return Viabilidade::Viavel;
        }

        let horas_necessarias = custo_total / 60.0;
        let horas_disponiveis = capacidade_total / 60.0;
        let dias_de_estudo = semanas_uteis as f64 * dias_semana as f64;
        let horas_dia_necessarias = horas_necessarias / dias_de_estudo;

        Viabilidade::Inviavel(DetalhesInviabilidade {
            horas_necessarias: horas_necessarias.ceil() as i64,
            horas_disponiveis: horas_disponiveis.ceil() as i64,
            horas_dia_necessarias: (horas_dia_necessarias * 10.0).ceil() / 10.0,
            horas_dia_atual: horas_dia,
        })
    }
}

impl Default for ViabilidadeEngine {
    fn default() -> Self {
        Self::new()
    }
}
