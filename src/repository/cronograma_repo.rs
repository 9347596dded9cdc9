// ==========================================
// Motor de Cronogramas - Repositório de cronogramas
// ==========================================
// Persistência do cabeçalho e dos itens do plano gerado.
// O item é um retrato do cálculo: nunca escreve de volta
// no catálogo de aulas.
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::domain::calendario::PeriodoFerias;
use crate::domain::cronograma::{
    Cronograma, CronogramaCompleto, CronogramaItem, CronogramaItemDetalhado,
};
use crate::domain::types::ModalidadeEstudo;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// CronogramaRepository
// ==========================================
pub struct CronogramaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CronogramaRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Obtém a conexão com o banco
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Cria o cabeçalho do cronograma.
    ///
    /// # Retorno
    /// - `Ok(id)`: id do cronograma criado
    pub fn create(&self, cronograma: &Cronograma) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        let periodos_ferias = serde_json::to_string(&cronograma.periodos_ferias)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
        let disciplinas = serde_json::to_string(&cronograma.disciplinas_selecionadas)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
        let ordem_frentes = cronograma
            .ordem_frentes_preferencia
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
        let modulos = cronograma
            .modulos_selecionados
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;

        conn.execute(
            r#"INSERT INTO cronogramas (
                id, aluno_id, curso_alvo_id, nome, data_inicio, data_fim,
                dias_estudo_semana, horas_estudo_dia, periodos_ferias,
                prioridade_minima, modalidade_estudo, disciplinas_selecionadas,
                ordem_frentes_preferencia, modulos_selecionados,
                excluir_aulas_concluidas, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            params![
                &cronograma.id,
                &cronograma.aluno_id,
                &cronograma.curso_alvo_id,
                &cronograma.nome,
                &cronograma.data_inicio.format("%Y-%m-%d").to_string(),
                &cronograma.data_fim.format("%Y-%m-%d").to_string(),
                &cronograma.dias_estudo_semana,
                &cronograma.horas_estudo_dia,
                &periodos_ferias,
                &cronograma.prioridade_minima,
                &cronograma.modalidade_estudo.to_string(),
                &disciplinas,
                &ordem_frentes,
                &modulos,
                if cronograma.excluir_aulas_concluidas { 1 } else { 0 },
                &cronograma.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;

        Ok(cronograma.id.clone())
    }

    /// Insere os itens do cronograma em lote.
    ///
    /// Executa dentro de uma única transação: ou todos os itens
    /// entram, ou nenhum entra.
    pub fn batch_insert_itens(&self, itens: &[CronogramaItem]) -> RepositoryResult<usize> {
        if itens.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        for item in itens {
            tx.execute(
                r#"INSERT INTO cronograma_itens (
                    id, cronograma_id, aula_id, semana_numero, ordem_na_semana, concluido
                ) VALUES (?, ?, ?, ?, ?, ?)"#,
                params![
                    &item.id,
                    &item.cronograma_id,
                    &item.aula_id,
                    &item.semana_numero,
                    &item.ordem_na_semana,
                    if item.concluido { 1 } else { 0 },
                ],
            )?;
        }

        tx.commit()?;
        Ok(itens.len())
    }

    /// Remove o cronograma e seus itens (ação compensatória da
    /// geração: um cabeçalho sem itens não pode ficar para trás).
    pub fn delete(&self, cronograma_id: &str) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM cronograma_itens WHERE cronograma_id = ?",
            params![cronograma_id],
        )?;
        tx.execute("DELETE FROM cronogramas WHERE id = ?", params![cronograma_id])?;

        tx.commit()?;
        Ok(())
    }

    /// Busca o cabeçalho por id.
    pub fn find_by_id(&self, cronograma_id: &str) -> RepositoryResult<Option<Cronograma>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, aluno_id, curso_alvo_id, nome, data_inicio, data_fim,
                      dias_estudo_semana, horas_estudo_dia, periodos_ferias,
                      prioridade_minima, modalidade_estudo, disciplinas_selecionadas,
                      ordem_frentes_preferencia, modulos_selecionados,
                      excluir_aulas_concluidas, created_at
               FROM cronogramas
               WHERE id = ?"#,
            params![cronograma_id],
            Self::map_cronograma,
        ) {
            Ok(cronograma) => Ok(Some(cronograma)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Busca o cronograma completo: cabeçalho mais itens com o
    /// detalhe da aula (nome, número, tempo estimado) pelo join.
    ///
    /// Itens ordenados por semana e ordem dentro da semana.
    pub fn find_completo(&self, cronograma_id: &str) -> RepositoryResult<Option<CronogramaCompleto>> {
        let cronograma = match self.find_by_id(cronograma_id)? {
            Some(c) => c,
            None => return Ok(None),
        };

        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT ci.id, ci.aula_id, ci.semana_numero, ci.ordem_na_semana, ci.concluido,
                      a.nome, a.numero_aula, a.tempo_estimado_minutos
               FROM cronograma_itens ci
               INNER JOIN aulas a ON ci.aula_id = a.id
               WHERE ci.cronograma_id = ?
               ORDER BY ci.semana_numero, ci.ordem_na_semana"#,
        )?;

        let itens = stmt
            .query_map(params![cronograma_id], |row| {
                Ok(CronogramaItemDetalhado {
                    id: row.get(0)?,
                    aula_id: row.get(1)?,
                    semana_numero: row.get(2)?,
                    ordem_na_semana: row.get(3)?,
                    concluido: row.get::<_, i32>(4)? == 1,
                    aula_nome: row.get(5)?,
                    numero_aula: row.get(6)?,
                    tempo_estimado_minutos: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<CronogramaItemDetalhado>, _>>()?;

        Ok(Some(CronogramaCompleto { cronograma, itens }))
    }

    /// Quantidade de itens persistidos de um cronograma.
    pub fn count_itens(&self, cronograma_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM cronograma_itens WHERE cronograma_id = ?",
            params![cronograma_id],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    /// Mapeia linha do banco para Cronograma
    fn map_cronograma(row: &rusqlite::Row) -> rusqlite::Result<Cronograma> {
        let conversao = |idx: usize, e: Box<dyn std::error::Error + Send + Sync>| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e)
        };

        let periodos_ferias: Vec<PeriodoFerias> =
            serde_json::from_str(&row.get::<_, String>(8)?)
                .map_err(|e| conversao(8, Box::new(e)))?;
        let modalidade: ModalidadeEstudo = row
            .get::<_, String>(10)?
            .parse()
            .map_err(|e: String| conversao(10, e.into()))?;
        let disciplinas: Vec<String> = serde_json::from_str(&row.get::<_, String>(11)?)
            .map_err(|e| conversao(11, Box::new(e)))?;
        let ordem_frentes: Option<Vec<String>> = row
            .get::<_, Option<String>>(12)?
            .map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(|e| conversao(12, Box::new(e)))?;
        let modulos: Option<Vec<String>> = row
            .get::<_, Option<String>>(13)?
            .map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(|e| conversao(13, Box::new(e)))?;

        Ok(Cronograma {
            id: row.get(0)?,
            aluno_id: row.get(1)?,
            curso_alvo_id: row.get(2)?,
            nome: row.get(3)?,
            data_inicio: NaiveDate::parse_from_str(&row.get::<_, String>(4)?, "%Y-%m-%d")
                .map_err(|e| conversao(4, Box::new(e)))?,
            data_fim: NaiveDate::parse_from_str(&row.get::<_, String>(5)?, "%Y-%m-%d")
                .map_err(|e| conversao(5, Box::new(e)))?,
            dias_estudo_semana: row.get(6)?,
            horas_estudo_dia: row.get(7)?,
            periodos_ferias,
            prioridade_minima: row.get(9)?,
            modalidade_estudo: modalidade,
            disciplinas_selecionadas: disciplinas,
            ordem_frentes_preferencia: ordem_frentes,
            modulos_selecionados: modulos,
            excluir_aulas_concluidas: row.get::<_, i32>(14)? == 1,
            created_at: NaiveDateTime::parse_from_str(
                &row.get::<_, String>(15)?,
                "%Y-%m-%d %H:%M:%S",
            )
            .map_err(|e| conversao(15, Box::new(e)))?,
        })
    }
}
