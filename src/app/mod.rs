// ==========================================
// Motor de Cronogramas - Camada de Aplicação
// ==========================================
// Composição explícita das dependências: só aqui existem
// handles de banco; engines e repositórios recebem tudo
// por parâmetro/injeção.
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
