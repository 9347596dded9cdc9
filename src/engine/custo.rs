// ==========================================
// Motor de Cronogramas - Estimador de custo
// ==========================================
// Converte a estimativa bruta de duração de cada aula
// no custo efetivo de alocação. Regra de negócio fixa:
// aula sem duração de autoria assume 10 minutos de
// conteúdo, e toda aula carrega 50% de overhead
// (revisão, anotações) além do tempo de conteúdo.
// ==========================================

use crate::domain::aula::{Aula, AulaComCusto};

/// Minutos assumidos para aula sem duração de autoria.
pub const TEMPO_PADRAO_MINUTOS: f64 = 10.0;

/// Fator de overhead aplicado sobre o tempo de conteúdo.
pub const FATOR_MULTIPLICADOR: f64 = 1.5;

// ==========================================
// CustoEngine
// ==========================================
pub struct CustoEngine {
    // engine sem estado
}

impl CustoEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Deriva o custo efetivo de cada aula.
    ///
    /// `custo = (tempo_estimado_minutos ?? 10) * 1.5`, sempre
    /// estritamente positivo. Nenhum arredondamento é aplicado
    /// aqui; frações de minuto são preservadas em memória.
    pub fn estimar(&self, aulas: Vec<Aula>) -> Vec<AulaComCusto> {
        aulas
            .into_iter()
            .map(|aula| {
                let base = aula
                    .tempo_estimado_minutos
                    .map(|m| m as f64)
                    .unwrap_or(TEMPO_PADRAO_MINUTOS);
                AulaComCusto {
                    aula,
                    custo: base * FATOR_MULTIPLICADOR,
                }
            })
            .collect()
    }

    /// Custo total do conjunto candidato, em minutos.
    pub fn custo_total(aulas: &[AulaComCusto]) -> f64 {
        aulas.iter().map(|a| a.custo).sum()
    }
}

impl Default for CustoEngine {
    fn default() -> Self {
        Self::new()
    }
}
