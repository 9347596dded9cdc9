// ==========================================
// Motor de Cronogramas - Camada de API
// ==========================================
// Fronteira da requisição: validação do payload,
// orquestração das etapas e conversão de todo erro
// em resultado estruturado. Nada estoura o processo.
// ==========================================

pub mod cronograma_api;
pub mod error;
pub mod request;

pub use cronograma_api::{CronogramaApi, CronogramaGerado, ResultadoGeracao};
pub use error::{ApiError, ApiResult};
pub use request::GerarCronogramaRequest;
