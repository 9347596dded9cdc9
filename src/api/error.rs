// ==========================================
// Motor de Cronogramas - Erros da camada de API
// ==========================================
// Taxonomia:
// - validação: payload malformado ou contraditório, rejeitado
//   antes de qualquer consulta, com mensagem por campo
// - resolução vazia: requisição bem formada, mas alguma etapa
//   de filtragem não produziu candidatos
// - infraestrutura: falha de banco/persistência, com a mensagem
//   de origem anexada (distinguível nos logs)
// A inviabilidade de tempo NÃO é um erro: é resultado terminal
// de primeira classe (ver cronograma_api::ResultadoGeracao).
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erros da camada de API
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Erros de validação
    // ==========================================
    #[error("Campos obrigatórios: {0}")]
    CamposObrigatorios(String),

    #[error("Parâmetro inválido (campo={campo}): {mensagem}")]
    ParametroInvalido { campo: String, mensagem: String },

    #[error("Datas inválidas: {0}")]
    DatasInvalidas(String),

    #[error("Você só pode criar cronogramas para si mesmo")]
    AcessoNegado,

    #[error("O período informado não possui semanas úteis: as férias cobrem todo o horizonte")]
    PeriodoSemSemanasUteis,

    // ==========================================
    // Resolução vazia
    // ==========================================
    #[error("Nenhuma frente encontrada para as disciplinas selecionadas")]
    NenhumaFrenteEncontrada,

    #[error("Nenhum módulo encontrado para as frentes selecionadas")]
    NenhumModuloEncontrado,

    #[error("Nenhuma aula encontrada com os critérios fornecidos")]
    NenhumaAulaEncontrada,

    #[error("Nenhuma aula restante após excluir concluídas")]
    NenhumaAulaRestante,

    // ==========================================
    // Erros de infraestrutura
    // ==========================================
    #[error("Erro ao buscar {contexto}: {causa}")]
    ConsultaCatalogo { contexto: String, causa: String },

    #[error("Erro ao criar cronograma: {0}")]
    CriarCronograma(String),

    #[error("Erro ao inserir itens do cronograma: {0}")]
    InserirItens(String),

    #[error(
        "Erro ao inserir itens do cronograma: {causa}; \
         falha também ao remover o cabeçalho órfão: {causa_rollback}"
    )]
    RollbackFalhou {
        causa: String,
        causa_rollback: String,
    },

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(String),

    #[error("Erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Classe do erro para logs e monitoramento.
    pub fn categoria(&self) -> &'static str {
        match self {
            ApiError::CamposObrigatorios(_)
            | ApiError::ParametroInvalido { .. }
            | ApiError::DatasInvalidas(_)
            | ApiError::PeriodoSemSemanasUteis => "VALIDACAO",
            ApiError::AcessoNegado => "AUTORIZACAO",
            ApiError::NenhumaFrenteEncontrada
            | ApiError::NenhumModuloEncontrado
            | ApiError::NenhumaAulaEncontrada
            | ApiError::NenhumaAulaRestante => "RESOLUCAO_VAZIA",
            ApiError::ConsultaCatalogo { .. }
            | ApiError::CriarCronograma(_)
            | ApiError::InserirItens(_)
            | ApiError::RollbackFalhou { .. }
            | ApiError::DatabaseError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => "INFRAESTRUTURA",
        }
    }
}

// ==========================================
// Conversão de RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Other(e) => ApiError::Other(e),
            outro => ApiError::DatabaseError(outro.to_string()),
        }
    }
}

/// Alias de Result
pub type ApiResult<T> = Result<T, ApiError>;
