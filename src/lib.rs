// ==========================================
// Plataforma Educacional - Motor de Cronogramas
// ==========================================
// Subsistema: geração de cronogramas de estudo
// Stack: Rust + SQLite
// ==========================================

// Inicializa o sistema de internacionalização
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de dados - acesso ao banco
pub mod repository;

// Camada de engine - regras de negócio puras
pub mod engine;

// Infraestrutura de banco (conexão / PRAGMA / schema)
pub mod db;

// Sistema de logs
pub mod logging;

// Internacionalização
pub mod i18n;

// Camada de API - fronteira da requisição
pub mod api;

// Camada de aplicação - composição das dependências
pub mod app;

// ==========================================
// Reexportação dos tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::ModalidadeEstudo;

// Entidades de domínio
pub use domain::{
    Aula, AulaComCusto, Cronograma, CronogramaCompleto, CronogramaItem, Estatisticas, Frente,
    PeriodoFerias, Semana,
};

// Engines
pub use engine::{
    CalendarioEngine, CustoEngine, DetalhesInviabilidade, DistribuidorEngine, ItemAlocado,
    Viabilidade, ViabilidadeEngine,
};

// API
pub use api::{
    ApiError, ApiResult, CronogramaApi, CronogramaGerado, GerarCronogramaRequest, ResultadoGeracao,
};

// ==========================================
// Constantes do sistema
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Motor de Cronogramas de Estudo";
