// ==========================================
// Motor de Cronogramas - Modelo de calendário
// ==========================================
// Semana de estudo e período de férias.
// A capacidade semanal é o orçamento de minutos
// disponível para alocação de aulas.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PeriodoFerias - intervalo de bloqueio
// ==========================================
// Datas inclusivas em ambas as pontas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodoFerias {
    #[serde(alias = "start")]
    pub inicio: NaiveDate,
    #[serde(alias = "end")]
    pub fim: NaiveDate,
}

impl PeriodoFerias {
    /// Verifica sobreposição com o intervalo `[inicio, fim]` (bordas inclusivas).
    ///
    /// Cobre sobreposição parcial em qualquer ponta e contenção
    /// total em qualquer direção.
    pub fn sobrepoe(&self, inicio: NaiveDate, fim: NaiveDate) -> bool {
        inicio <= self.fim && fim >= self.inicio
    }
}

// ==========================================
// Semana - uma semana do horizonte de estudo
// ==========================================
// Calculada uma única vez por requisição; imutável depois.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semana {
    pub numero: i32,               // sequência 1-based, chave de ordenação
    pub data_inicio: NaiveDate,    // início inclusivo
    pub data_fim: NaiveDate,       // fim inclusivo (última semana truncada ao horizonte)
    pub is_ferias: bool,           // true se sobrepõe qualquer período de férias
    pub capacidade_minutos: f64,   // 0 em férias; senão horas_dia * dias_semana * 60
}

impl Semana {
    /// Semana disponível para alocação de aulas.
    pub fn is_util(&self) -> bool {
        !self.is_ferias
    }
}
