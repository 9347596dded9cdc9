// ==========================================
// Motor de Cronogramas - API de geração
// ==========================================
// Orquestra as etapas em ordem estrita de dependência:
// 1) cálculo de capacidade (calendário)
// 2) busca e filtragem de aulas (catálogo)
// 3) cálculo de custo real
// 4) verificação de viabilidade (porta de corte)
// 5) distribuição
// 6) persistência (com ação compensatória)
// O fluxo é estritamente para frente; nenhuma etapa
// realimenta a anterior.
// ==========================================

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::request::GerarCronogramaRequest;
use crate::domain::aula::ordenar_aulas;
use crate::domain::cronograma::{Cronograma, CronogramaCompleto, CronogramaItem, Estatisticas};
use crate::domain::types::ModalidadeEstudo;
use crate::engine::calendario::CalendarioEngine;
use crate::engine::custo::CustoEngine;
use crate::engine::distribuidor::DistribuidorEngine;
use crate::engine::viabilidade::{DetalhesInviabilidade, Viabilidade, ViabilidadeEngine};
use crate::repository::catalogo_repo::CatalogoRepository;
use crate::repository::cronograma_repo::CronogramaRepository;

// ==========================================
// CronogramaGerado - resultado de sucesso
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronogramaGerado {
    pub cronograma: CronogramaCompleto,
    pub estatisticas: Estatisticas,
}

// ==========================================
// ResultadoGeracao - desfecho da requisição
// ==========================================
// TempoInsuficiente é terminal e não é erro: carrega os
// números de remediação para o cliente apresentar.
#[derive(Debug, Clone)]
pub enum ResultadoGeracao {
    Gerado(CronogramaGerado),
    TempoInsuficiente(DetalhesInviabilidade),
}

// ==========================================
// CronogramaApi
// ==========================================
// Os repositórios entram por injeção explícita; os engines
// são puros e não guardam estado entre requisições.
pub struct CronogramaApi {
    catalogo_repo: Arc<CatalogoRepository>,
    cronograma_repo: Arc<CronogramaRepository>,
    calendario: CalendarioEngine,
    custo: CustoEngine,
    viabilidade: ViabilidadeEngine,
    distribuidor: DistribuidorEngine,
}

impl CronogramaApi {
    pub fn new(
        catalogo_repo: Arc<CatalogoRepository>,
        cronograma_repo: Arc<CronogramaRepository>,
    ) -> Self {
        Self {
            catalogo_repo,
            cronograma_repo,
            calendario: CalendarioEngine::new(),
            custo: CustoEngine::new(),
            viabilidade: ViabilidadeEngine::new(),
            distribuidor: DistribuidorEngine::new(),
        }
    }

    /// Gera e persiste o cronograma de estudo do aluno.
    ///
    /// # Parâmetros
    /// - `usuario_autenticado`: id do chamador já autenticado
    ///   (a autenticação em si acontece fora deste subsistema)
    /// - `request`: payload tipado e ainda não validado
    ///
    /// # Retorno
    /// - `Ok(ResultadoGeracao::Gerado)`: cronograma persistido, com
    ///   itens detalhados e estatísticas
    /// - `Ok(ResultadoGeracao::TempoInsuficiente)`: conteúdo não cabe
    ///   na capacidade; nada foi persistido
    /// - `Err(ApiError)`: validação, resolução vazia ou infraestrutura
    #[instrument(skip(self, request), fields(
        aluno_id = %request.aluno_id,
        modalidade = %request.modalidade,
        disciplinas_count = request.disciplinas_ids.len()
    ))]
    pub fn gerar(
        &self,
        usuario_autenticado: &str,
        request: &GerarCronogramaRequest,
    ) -> ApiResult<ResultadoGeracao> {
        // Validação da fronteira: rejeita na primeira violação
        request.validar(usuario_autenticado)?;

        let prioridade_minima = request.prioridade_minima_efetiva();
        let curso_id = request.curso_alvo_id.as_deref();

        // ==========================================
        // Etapa 1: cálculo de capacidade
        // ==========================================
        let semanas = self.calendario.gerar_semanas(
            request.data_inicio,
            request.data_fim,
            &request.ferias,
            request.horas_dia,
            request.dias_semana,
        );
        let semanas_uteis = semanas.iter().filter(|s| s.is_util()).count();
        if semanas_uteis == 0 {
            // Sem semana útil a conta de remediação da etapa 4 não
            // teria denominador; rejeita já aqui
            return Err(ApiError::PeriodoSemSemanasUteis);
        }
        let capacidade_total = CalendarioEngine::capacidade_total(&semanas);
        debug!(
            total_semanas = semanas.len(),
            semanas_uteis, capacidade_total, "capacidade calculada"
        );

        // Conjunto de aulas concluídas (melhor esforço)
        let excluir_concluidas = request.excluir_concluidas();
        let aulas_concluidas: HashSet<String> = if excluir_concluidas {
            self.catalogo_repo
                .aulas_concluidas(&request.aluno_id, curso_id)
                .map_err(|e| ApiError::ConsultaCatalogo {
                    contexto: "aulas concluídas".to_string(),
                    causa: e.to_string(),
                })?
        } else {
            HashSet::new()
        };

        // ==========================================
        // Etapa 2: busca e filtragem de aulas
        // ==========================================
        let frente_ids = self
            .catalogo_repo
            .frentes_das_disciplinas(&request.disciplinas_ids, curso_id)
            .map_err(|e| ApiError::ConsultaCatalogo {
                contexto: "frentes".to_string(),
                causa: e.to_string(),
            })?;
        if frente_ids.is_empty() {
            return Err(ApiError::NenhumaFrenteEncontrada);
        }

        let mut modulo_ids = self
            .catalogo_repo
            .modulos_das_frentes(&frente_ids, curso_id)
            .map_err(|e| ApiError::ConsultaCatalogo {
                contexto: "módulos".to_string(),
                causa: e.to_string(),
            })?;
        if !request.modulos_ids.is_empty() {
            modulo_ids.retain(|id| request.modulos_ids.contains(id));
        }
        if modulo_ids.is_empty() {
            return Err(ApiError::NenhumModuloEncontrado);
        }

        let mut aulas = self
            .catalogo_repo
            .aulas_dos_modulos(&modulo_ids, prioridade_minima, curso_id)
            .map_err(|e| ApiError::ConsultaCatalogo {
                contexto: "aulas".to_string(),
                causa: e.to_string(),
            })?;
        if aulas.is_empty() {
            return Err(ApiError::NenhumaAulaEncontrada);
        }

        if excluir_concluidas && !aulas_concluidas.is_empty() {
            aulas.retain(|a| !aulas_concluidas.contains(&a.id));
            if aulas.is_empty() {
                return Err(ApiError::NenhumaAulaRestante);
            }
        }

        // Ordem canônica: disciplina > frente > módulo > aula
        ordenar_aulas(&mut aulas);
        let total_aulas = aulas.len();
        debug!(total_aulas, "conjunto candidato resolvido");

        // ==========================================
        // Etapa 3: cálculo de custo real
        // ==========================================
        let aulas_com_custo = self.custo.estimar(aulas);
        let custo_total = CustoEngine::custo_total(&aulas_com_custo);

        // ==========================================
        // Etapa 4: verificação de viabilidade
        // ==========================================
        if let Viabilidade::Inviavel(detalhes) = self.viabilidade.verificar(
            custo_total,
            capacidade_total,
            semanas_uteis,
            request.dias_semana,
            request.horas_dia,
        ) {
            info!(
                custo_total,
                capacidade_total,
                horas_dia_necessarias = detalhes.horas_dia_necessarias,
                "conteúdo não cabe na capacidade disponível"
            );
            return Ok(ResultadoGeracao::TempoInsuficiente(detalhes));
        }

        // ==========================================
        // Etapa 5: distribuição
        // ==========================================
        let mut frentes = self.distribuidor.agrupar_frentes(&aulas_com_custo);
        match request.modalidade {
            ModalidadeEstudo::Paralelo => {
                self.distribuidor.calcular_pesos(&mut frentes, custo_total);
            }
            ModalidadeEstudo::Sequencial => {
                if let Some(ordem) = &request.ordem_frentes_preferencia {
                    self.distribuidor.ordenar_por_preferencia(&mut frentes, ordem);
                }
            }
        }
        let alocados = self
            .distribuidor
            .distribuir(&frentes, &semanas, request.modalidade);

        // ==========================================
        // Etapa 6: persistência
        // ==========================================
        let cronograma = Cronograma {
            id: Uuid::new_v4().to_string(),
            aluno_id: request.aluno_id.clone(),
            curso_alvo_id: request.curso_alvo_id.clone(),
            nome: request.nome_efetivo(),
            data_inicio: request.data_inicio,
            data_fim: request.data_fim,
            dias_estudo_semana: request.dias_semana,
            horas_estudo_dia: request.horas_dia,
            periodos_ferias: request.ferias.clone(),
            prioridade_minima,
            modalidade_estudo: request.modalidade,
            disciplinas_selecionadas: request.disciplinas_ids.clone(),
            ordem_frentes_preferencia: request.ordem_frentes_preferencia.clone(),
            modulos_selecionados: if request.modulos_ids.is_empty() {
                None
            } else {
                Some(request.modulos_ids.clone())
            },
            excluir_aulas_concluidas: excluir_concluidas,
            created_at: chrono::Local::now().naive_local(),
        };

        self.cronograma_repo
            .create(&cronograma)
            .map_err(|e| ApiError::CriarCronograma(e.to_string()))?;

        let itens: Vec<CronogramaItem> = alocados
            .iter()
            .map(|alocado| CronogramaItem {
                id: Uuid::new_v4().to_string(),
                cronograma_id: cronograma.id.clone(),
                aula_id: alocado.aula_id.clone(),
                semana_numero: alocado.semana_numero,
                ordem_na_semana: alocado.ordem_na_semana,
                concluido: false,
            })
            .collect();

        if let Err(erro_itens) = self.cronograma_repo.batch_insert_itens(&itens) {
            // Ação compensatória: cabeçalho sem itens não pode ficar
            warn!(
                cronograma_id = %cronograma.id,
                erro = %erro_itens,
                "falha no insert dos itens; removendo cabeçalho"
            );
            return Err(match self.cronograma_repo.delete(&cronograma.id) {
                Ok(()) => ApiError::InserirItens(erro_itens.to_string()),
                Err(erro_rollback) => ApiError::RollbackFalhou {
                    causa: erro_itens.to_string(),
                    causa_rollback: erro_rollback.to_string(),
                },
            });
        }

        // Releitura com o detalhe das aulas; falha aqui não desfaz a
        // persistência, degrada para o cabeçalho sem itens
        let completo = match self.cronograma_repo.find_completo(&cronograma.id) {
            Ok(Some(completo)) => completo,
            Ok(None) => {
                warn!(cronograma_id = %cronograma.id, "cronograma recém-criado não encontrado na releitura");
                CronogramaCompleto {
                    cronograma: cronograma.clone(),
                    itens: Vec::new(),
                }
            }
            Err(e) => {
                warn!(cronograma_id = %cronograma.id, erro = %e, "falha ao reler cronograma completo");
                CronogramaCompleto {
                    cronograma: cronograma.clone(),
                    itens: Vec::new(),
                }
            }
        };

        let estatisticas = Estatisticas {
            total_aulas,
            total_semanas: semanas.len(),
            semanas_uteis,
            capacidade_total_minutos: capacidade_total,
            custo_total_minutos: custo_total,
            frentes_distribuidas: frentes.len(),
        };

        info!(
            cronograma_id = %cronograma.id,
            itens = itens.len(),
            frentes = frentes.len(),
            "cronograma gerado e persistido"
        );

        Ok(ResultadoGeracao::Gerado(CronogramaGerado {
            cronograma: completo,
            estatisticas,
        }))
    }
}
