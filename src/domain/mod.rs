// ==========================================
// Motor de Cronogramas - Camada de Domínio
// ==========================================
// Entidades e tipos compartilhados entre engine,
// repositório e API. Sem acesso a banco, sem I/O.
// ==========================================

pub mod aula;
pub mod calendario;
pub mod cronograma;
pub mod types;

// Reexportação das entidades
pub use aula::{ordenar_aulas, Aula, AulaComCusto, Frente};
pub use calendario::{PeriodoFerias, Semana};
pub use cronograma::{
    Cronograma, CronogramaCompleto, CronogramaItem, CronogramaItemDetalhado, Estatisticas,
};
pub use types::ModalidadeEstudo;
