// ==========================================
// Motor de Cronogramas - Camada de Repositório
// ==========================================
// Acesso a dados, sem regra de negócio. Os engines
// nunca tocam SQL; tudo entra e sai por aqui.
// ==========================================

pub mod catalogo_repo;
pub mod cronograma_repo;
pub mod error;

pub use catalogo_repo::CatalogoRepository;
pub use cronograma_repo::CronogramaRepository;
pub use error::{RepositoryError, RepositoryResult};
