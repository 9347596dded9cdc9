// ==========================================
// Motor de Cronogramas - Erros da camada de dados
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Erros de banco =====
    #[error("registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("falha ao abrir conexão com o banco: {0}")]
    DatabaseConnectionError(String),

    #[error("falha ao obter lock do banco: {0}")]
    LockError(String),

    #[error("falha em transação do banco: {0}")]
    DatabaseTransactionError(String),

    #[error("falha em consulta ao banco: {0}")]
    DatabaseQueryError(String),

    #[error("violação de restrição única: {0}")]
    UniqueConstraintViolation(String),

    #[error("violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    // ===== Erros de dados =====
    #[error("valor de campo inválido (campo={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== Erros genéricos =====
    #[error("erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Conversão de rusqlite::Error
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "desconhecida".to_string(),
                id: "desconhecido".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result
pub type RepositoryResult<T> = Result<T, RepositoryError>;
