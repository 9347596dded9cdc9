// ==========================================
// Motor de Cronogramas - Payload da requisição
// ==========================================
// Requisição tipada e validada na fronteira: rejeita na
// primeira violação, com mensagem específica por campo.
// Os nomes de campo seguem o contrato dos clientes; os
// nomes em inglês da API pública são aceitos como alias.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::calendario::PeriodoFerias;
use crate::domain::cronograma::NOME_CRONOGRAMA_PADRAO;
use crate::domain::types::ModalidadeEstudo;

// ==========================================
// GerarCronogramaRequest
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GerarCronogramaRequest {
    #[serde(alias = "studentId")]
    pub aluno_id: String,

    #[serde(alias = "startDate")]
    pub data_inicio: NaiveDate,

    #[serde(alias = "endDate")]
    pub data_fim: NaiveDate,

    #[serde(alias = "subjectIds")]
    pub disciplinas_ids: Vec<String>,

    #[serde(default, alias = "courseId")]
    pub curso_alvo_id: Option<String>,

    #[serde(default, alias = "moduleIds")]
    pub modulos_ids: Vec<String>,

    #[serde(alias = "hoursPerDay")]
    pub horas_dia: f64,

    #[serde(alias = "daysPerWeek")]
    pub dias_semana: i32,

    #[serde(default, alias = "minimumPriority")]
    pub prioridade_minima: Option<i32>,

    #[serde(alias = "distributionMode")]
    pub modalidade: ModalidadeEstudo,

    #[serde(default, alias = "trackPreferenceOrder")]
    pub ordem_frentes_preferencia: Option<Vec<String>>,

    #[serde(default, alias = "vacationIntervals")]
    pub ferias: Vec<PeriodoFerias>,

    #[serde(default, alias = "excludeCompletedLessons")]
    pub excluir_aulas_concluidas: Option<bool>,

    #[serde(default, alias = "scheduleName")]
    pub nome: Option<String>,
}

impl GerarCronogramaRequest {
    /// Valida a requisição contra o chamador autenticado.
    ///
    /// Rejeita na primeira violação. A checagem de datas não
    /// parseáveis acontece antes, na desserialização.
    pub fn validar(&self, usuario_autenticado: &str) -> ApiResult<()> {
        if self.aluno_id.trim().is_empty() {
            return Err(ApiError::CamposObrigatorios("aluno_id".to_string()));
        }
        if self.aluno_id != usuario_autenticado {
            return Err(ApiError::AcessoNegado);
        }
        if self.data_fim <= self.data_inicio {
            return Err(ApiError::DatasInvalidas(
                "data_fim deve ser posterior a data_inicio".to_string(),
            ));
        }
        if self.disciplinas_ids.is_empty() {
            return Err(ApiError::CamposObrigatorios("disciplinas_ids".to_string()));
        }
        if !(self.horas_dia > 0.0 && self.horas_dia <= 24.0) {
            return Err(ApiError::ParametroInvalido {
                campo: "horas_dia".to_string(),
                mensagem: "deve estar entre 0 (exclusivo) e 24".to_string(),
            });
        }
        if !(1..=7).contains(&self.dias_semana) {
            return Err(ApiError::ParametroInvalido {
                campo: "dias_semana".to_string(),
                mensagem: "deve estar entre 1 e 7".to_string(),
            });
        }

        Ok(())
    }

    /// Prioridade mínima efetiva: nunca abaixo de 1
    /// (prioridade 0 marca aula fora do plano de estudo).
    pub fn prioridade_minima_efetiva(&self) -> i32 {
        self.prioridade_minima.unwrap_or(1).max(1)
    }

    /// Exclusão de aulas concluídas (padrão: sim).
    pub fn excluir_concluidas(&self) -> bool {
        self.excluir_aulas_concluidas.unwrap_or(true)
    }

    /// Nome do cronograma, com o padrão do produto.
    pub fn nome_efetivo(&self) -> String {
        self.nome
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| NOME_CRONOGRAMA_PADRAO.to_string())
    }
}
