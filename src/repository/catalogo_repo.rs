// ==========================================
// Motor de Cronogramas - Repositório do catálogo
// ==========================================
// Resolve o conteúdo selecionado pelo aluno:
// disciplinas -> frentes -> módulos -> aulas, com o
// filtro de prioridade aplicado direto na consulta.
// Também resolve o conjunto de aulas já concluídas.
// ==========================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::warn;

use crate::domain::aula::Aula;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// CatalogoRepository
// ==========================================
pub struct CatalogoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogoRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Obtém a conexão com o banco
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Placeholders `?, ?, ...` para listas IN
    fn placeholders(n: usize) -> String {
        vec!["?"; n].join(", ")
    }

    /// Busca as frentes das disciplinas selecionadas.
    ///
    /// # Parâmetros
    /// - `disciplinas_ids`: disciplinas escolhidas pelo aluno
    /// - `curso_id`: filtro opcional de escopo de curso
    ///
    /// # Retorno
    /// - `Ok(Vec<String>)`: ids das frentes (vazio se nada casar)
    pub fn frentes_das_disciplinas(
        &self,
        disciplinas_ids: &[String],
        curso_id: Option<&str>,
    ) -> RepositoryResult<Vec<String>> {
        if disciplinas_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;

        let mut sql = format!(
            "SELECT id FROM frentes WHERE disciplina_id IN ({})",
            Self::placeholders(disciplinas_ids.len())
        );
        let mut params: Vec<Value> = disciplinas_ids
            .iter()
            .map(|id| Value::from(id.clone()))
            .collect();
        if let Some(curso) = curso_id {
            sql.push_str(" AND curso_id = ?");
            params.push(Value::from(curso.to_string()));
        }

        let mut stmt = conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(params), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(ids)
    }

    /// Busca os módulos das frentes resolvidas.
    pub fn modulos_das_frentes(
        &self,
        frente_ids: &[String],
        curso_id: Option<&str>,
    ) -> RepositoryResult<Vec<String>> {
        if frente_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;

        let mut sql = format!(
            "SELECT id FROM modulos WHERE frente_id IN ({})",
            Self::placeholders(frente_ids.len())
        );
        let mut params: Vec<Value> = frente_ids.iter().map(|id| Value::from(id.clone())).collect();
        if let Some(curso) = curso_id {
            sql.push_str(" AND curso_id = ?");
            params.push(Value::from(curso.to_string()));
        }

        let mut stmt = conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(params), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(ids)
    }

    /// Busca as aulas dos módulos com o filtro de prioridade.
    ///
    /// Aulas com prioridade 0 nunca entram no conjunto candidato,
    /// independentemente do mínimo pedido. Os nomes de módulo,
    /// frente e disciplina chegam desnormalizados pelo join.
    pub fn aulas_dos_modulos(
        &self,
        modulo_ids: &[String],
        prioridade_minima: i32,
        curso_id: Option<&str>,
    ) -> RepositoryResult<Vec<Aula>> {
        if modulo_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;

        let mut sql = format!(
            r#"SELECT a.id, a.nome, a.numero_aula, a.tempo_estimado_minutos, a.prioridade,
                      m.id, m.nome, m.numero_modulo,
                      f.id, f.nome,
                      d.id, d.nome
               FROM aulas a
               INNER JOIN modulos m ON a.modulo_id = m.id
               INNER JOIN frentes f ON m.frente_id = f.id
               INNER JOIN disciplinas d ON f.disciplina_id = d.id
               WHERE a.modulo_id IN ({})
                 AND a.prioridade >= ?
                 AND a.prioridade != 0"#,
            Self::placeholders(modulo_ids.len())
        );
        let mut params: Vec<Value> = modulo_ids.iter().map(|id| Value::from(id.clone())).collect();
        params.push(Value::from(i64::from(prioridade_minima)));
        if let Some(curso) = curso_id {
            sql.push_str(" AND a.curso_id = ?");
            params.push(Value::from(curso.to_string()));
        }

        let mut stmt = conn.prepare(&sql)?;
        let aulas = stmt
            .query_map(params_from_iter(params), Self::map_aula)?
            .collect::<Result<Vec<Aula>, _>>()?;

        Ok(aulas)
    }

    /// Resolve o conjunto de aulas já concluídas pelo aluno no curso.
    ///
    /// Fonte primária: tabela `aulas_concluidas`. Quando a fonte
    /// primária falha ou não tem registros, cai para o histórico de
    /// itens de cronograma marcados como concluídos. Falha também no
    /// histórico degrada para conjunto vazio com warning: o dado de
    /// conclusão é de melhor esforço, não bloqueia a geração.
    ///
    /// Sem escopo de curso não há como cruzar o histórico; retorna vazio.
    pub fn aulas_concluidas(
        &self,
        aluno_id: &str,
        curso_id: Option<&str>,
    ) -> RepositoryResult<HashSet<String>> {
        let curso = match curso_id {
            Some(c) => c,
            None => return Ok(HashSet::new()),
        };

        match self.aulas_concluidas_primaria(aluno_id, curso) {
            Ok(ids) if !ids.is_empty() => return Ok(ids),
            Ok(_) => {}
            Err(e) => {
                warn!(aluno_id, erro = %e, "falha ao buscar aulas concluídas; tentando histórico");
            }
        }

        match self.aulas_concluidas_historico(aluno_id, curso) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!(aluno_id, erro = %e, "falha ao buscar histórico de aulas concluídas");
                Ok(HashSet::new())
            }
        }
    }

    /// Fonte primária: tabela de conclusões por curso
    fn aulas_concluidas_primaria(
        &self,
        aluno_id: &str,
        curso_id: &str,
    ) -> RepositoryResult<HashSet<String>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT aula_id FROM aulas_concluidas WHERE aluno_id = ? AND curso_id = ?",
        )?;
        let ids = stmt
            .query_map(rusqlite::params![aluno_id, curso_id], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<HashSet<String>, _>>()?;

        Ok(ids)
    }

    /// Fonte histórica: itens de cronogramas anteriores do aluno
    fn aulas_concluidas_historico(
        &self,
        aluno_id: &str,
        curso_id: &str,
    ) -> RepositoryResult<HashSet<String>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT ci.aula_id
               FROM cronograma_itens ci
               INNER JOIN cronogramas c ON ci.cronograma_id = c.id
               WHERE ci.concluido = 1
                 AND c.aluno_id = ?
                 AND c.curso_alvo_id = ?"#,
        )?;
        let ids = stmt
            .query_map(rusqlite::params![aluno_id, curso_id], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<HashSet<String>, _>>()?;

        Ok(ids)
    }

    /// Mapeia linha do join para Aula
    fn map_aula(row: &rusqlite::Row) -> rusqlite::Result<Aula> {
        Ok(Aula {
            id: row.get(0)?,
            nome: row.get(1)?,
            numero_aula: row.get(2)?,
            tempo_estimado_minutos: row.get(3)?,
            prioridade: row.get(4)?,
            modulo_id: row.get(5)?,
            modulo_nome: row.get(6)?,
            numero_modulo: row.get(7)?,
            frente_id: row.get(8)?,
            frente_nome: row.get(9)?,
            disciplina_id: row.get(10)?,
            disciplina_nome: row.get(11)?,
        })
    }
}
