// ==========================================
// Motor de Cronogramas - Estado da aplicação
// ==========================================
// Monta a cadeia conexão -> repositórios -> API.
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::CronogramaApi;
use crate::db;
use crate::repository::{CatalogoRepository, CronogramaRepository};

/// Estado da aplicação
///
/// Guarda a instância da API e os recursos compartilhados.
pub struct AppState {
    /// Caminho do banco de dados
    pub db_path: String,

    /// API de geração de cronogramas
    pub cronograma_api: Arc<CronogramaApi>,
}

impl AppState {
    /// Cria o estado da aplicação.
    ///
    /// Abre a conexão com PRAGMAs unificados, garante o schema e
    /// instancia repositórios e API.
    ///
    /// # Parâmetros
    /// - `db_path`: caminho do arquivo SQLite
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(%db_path, "inicializando AppState");

        if let Some(parent) = PathBuf::from(&db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("não foi possível criar o diretório do banco: {}", e))?;
            }
        }

        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("não foi possível abrir o banco: {}", e))?;
        db::init_schema(&conn)
            .map_err(|e| format!("não foi possível inicializar o schema: {}", e))?;

        let conn = Arc::new(Mutex::new(conn));

        let catalogo_repo = Arc::new(CatalogoRepository::new(Arc::clone(&conn)));
        let cronograma_repo = Arc::new(CronogramaRepository::new(Arc::clone(&conn)));

        let cronograma_api = Arc::new(CronogramaApi::new(catalogo_repo, cronograma_repo));

        Ok(Self {
            db_path,
            cronograma_api,
        })
    }
}

/// Caminho padrão do banco de dados.
///
/// Prioridade: variável CRONOGRAMA_DB; senão o diretório de dados
/// do usuário; senão o diretório corrente.
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("CRONOGRAMA_DB") {
        return path;
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cronograma-engine")
        .join("cronograma.db")
        .to_string_lossy()
        .to_string()
}
