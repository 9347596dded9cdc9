// ==========================================
// Motor de Cronogramas - Particionador de calendário
// ==========================================
// Divide o horizonte [data_inicio, data_fim] em semanas
// de 7 dias, marca semanas de férias e atribui o orçamento
// de minutos de estudo a cada semana útil.
// ==========================================

use chrono::{Duration, NaiveDate};
use tracing::instrument;

use crate::domain::calendario::{PeriodoFerias, Semana};

// ==========================================
// CalendarioEngine
// ==========================================
pub struct CalendarioEngine {
    // engine sem estado
}

impl CalendarioEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Gera as semanas do horizonte de estudo.
    ///
    /// Regras:
    /// 1) Caminha de 7 em 7 dias a partir de `data_inicio` enquanto
    ///    o início da semana não passa de `data_fim`.
    /// 2) O fim nominal da semana é `inicio + 6 dias`; a última semana
    ///    tem `data_fim` truncado ao fim do horizonte.
    /// 3) Semana em férias: o intervalo nominal sobrepõe qualquer
    ///    período de férias (bordas inclusivas). A sobreposição é
    ///    testada contra o fim nominal, antes do truncamento.
    /// 4) Capacidade: 0 em férias; senão `horas_dia * dias_semana * 60`.
    ///
    /// # Parâmetros
    /// - `data_inicio`, `data_fim`: horizonte inclusivo (fim após início,
    ///   validado na fronteira da API)
    /// - `ferias`: períodos de bloqueio
    /// - `horas_dia`, `dias_semana`: parâmetros de estudo, positivos
    ///
    /// # Retorno
    /// Semanas em ordem, numeradas a partir de 1.
    #[instrument(skip(self, ferias), fields(ferias_count = ferias.len()))]
    pub fn gerar_semanas(
        &self,
        data_inicio: NaiveDate,
        data_fim: NaiveDate,
        ferias: &[PeriodoFerias],
        horas_dia: f64,
        dias_semana: i32,
    ) -> Vec<Semana> {
        let capacidade_semanal = horas_dia * dias_semana as f64 * 60.0;

        let mut semanas = Vec::new();
        let mut inicio = data_inicio;
        let mut numero = 1;

        while inicio <= data_fim {
            let fim_nominal = inicio + Duration::days(6);

            let is_ferias = ferias.iter().any(|p| p.sobrepoe(inicio, fim_nominal));

            semanas.push(Semana {
                numero,
                data_inicio: inicio,
                data_fim: fim_nominal.min(data_fim),
                is_ferias,
                capacidade_minutos: if is_ferias { 0.0 } else { capacidade_semanal },
            });

            inicio += Duration::days(7);
            numero += 1;
        }

        semanas
    }

    /// Soma da capacidade das semanas úteis.
    pub fn capacidade_total(semanas: &[Semana]) -> f64 {
        semanas
            .iter()
            .filter(|s| s.is_util())
            .map(|s| s.capacidade_minutos)
            .sum()
    }
}

impl Default for CalendarioEngine {
    fn default() -> Self {
        Self::new()
    }
}
