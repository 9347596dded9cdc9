// ==========================================
// Motor de Cronogramas - SQLite: conexão e schema
// ==========================================
// Objetivo:
// - Unificar o comportamento de PRAGMA de todas as conexões,
//   evitando "parte dos módulos com foreign keys, parte sem"
// - Unificar o busy_timeout para reduzir erros esporádicos
//   de busy em escrita concorrente
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout padrão (milissegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Aplica os PRAGMAs unificados em uma conexão.
///
/// foreign_keys e busy_timeout precisam ser configurados
/// por conexão, não por banco.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre uma conexão SQLite já configurada.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Cria as tabelas do subsistema quando ainda não existem.
///
/// O catálogo (disciplinas/frentes/modulos/aulas) é populado por
/// outro subsistema; aqui ele só precisa existir para as consultas
/// e para os testes.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS disciplinas (
            id TEXT PRIMARY KEY,
            nome TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS frentes (
            id TEXT PRIMARY KEY,
            nome TEXT NOT NULL,
            disciplina_id TEXT NOT NULL REFERENCES disciplinas(id),
            curso_id TEXT
        );

        CREATE TABLE IF NOT EXISTS modulos (
            id TEXT PRIMARY KEY,
            nome TEXT NOT NULL,
            numero_modulo INTEGER,
            frente_id TEXT NOT NULL REFERENCES frentes(id),
            curso_id TEXT
        );

        CREATE TABLE IF NOT EXISTS aulas (
            id TEXT PRIMARY KEY,
            nome TEXT NOT NULL,
            numero_aula INTEGER,
            tempo_estimado_minutos INTEGER,
            prioridade INTEGER NOT NULL DEFAULT 1,
            modulo_id TEXT NOT NULL REFERENCES modulos(id),
            curso_id TEXT
        );

        CREATE TABLE IF NOT EXISTS aulas_concluidas (
            aluno_id TEXT NOT NULL,
            curso_id TEXT NOT NULL,
            aula_id TEXT NOT NULL,
            PRIMARY KEY (aluno_id, curso_id, aula_id)
        );

        CREATE TABLE IF NOT EXISTS cronogramas (
            id TEXT PRIMARY KEY,
            aluno_id TEXT NOT NULL,
            curso_alvo_id TEXT,
            nome TEXT NOT NULL,
            data_inicio TEXT NOT NULL,
            data_fim TEXT NOT NULL,
            dias_estudo_semana INTEGER NOT NULL,
            horas_estudo_dia REAL NOT NULL,
            periodos_ferias TEXT NOT NULL DEFAULT '[]',
            prioridade_minima INTEGER NOT NULL DEFAULT 1,
            modalidade_estudo TEXT NOT NULL,
            disciplinas_selecionadas TEXT NOT NULL DEFAULT '[]',
            ordem_frentes_preferencia TEXT,
            modulos_selecionados TEXT,
            excluir_aulas_concluidas INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cronograma_itens (
            id TEXT PRIMARY KEY,
            cronograma_id TEXT NOT NULL REFERENCES cronogramas(id) ON DELETE CASCADE,
            aula_id TEXT NOT NULL REFERENCES aulas(id),
            semana_numero INTEGER NOT NULL,
            ordem_na_semana INTEGER NOT NULL,
            concluido INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_cronograma_itens_cronograma
            ON cronograma_itens(cronograma_id);
        CREATE INDEX IF NOT EXISTS idx_cronogramas_aluno
            ON cronogramas(aluno_id);
        "#,
    )
}
