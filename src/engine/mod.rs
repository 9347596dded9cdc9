// ==========================================
// Motor de Cronogramas - Camada de Engine
// ==========================================
// Regras de negócio puras, executadas em passe único:
// calendário -> custo -> viabilidade -> distribuição.
// Engines não montam SQL e não guardam estado ambiente;
// todos os dados entram por parâmetro.
// ==========================================

pub mod calendario;
pub mod custo;
pub mod distribuidor;
pub mod viabilidade;

// Reexportação dos engines
pub use calendario::CalendarioEngine;
pub use custo::{CustoEngine, FATOR_MULTIPLICADOR, TEMPO_PADRAO_MINUTOS};
pub use distribuidor::{DistribuidorEngine, ItemAlocado};
pub use viabilidade::{DetalhesInviabilidade, Viabilidade, ViabilidadeEngine};
