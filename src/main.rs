// ==========================================
// Motor de Cronogramas - Entrada de linha de comando
// ==========================================
// Lê a requisição (JSON) de um arquivo, gera o cronograma
// contra o banco local e imprime o desfecho estruturado
// em stdout: sucesso, tempo insuficiente ou erro.
// ==========================================

use std::process::ExitCode;

use cronograma_engine::api::ResultadoGeracao;
use cronograma_engine::app::{get_default_db_path, AppState};
use cronograma_engine::{i18n, logging, GerarCronogramaRequest};

fn main() -> ExitCode {
    logging::init();
    i18n::set_locale("pt-BR");

    tracing::info!("==================================================");
    tracing::info!("{}", cronograma_engine::APP_NAME);
    tracing::info!("Versão: {}", cronograma_engine::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    let request_path = match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!("Uso: gerar-cronograma <requisicao.json>");
            eprintln!();
            eprintln!("Variáveis de ambiente:");
            eprintln!("  CRONOGRAMA_DB     caminho do banco SQLite");
            eprintln!("  CRONOGRAMA_ALUNO  id do aluno autenticado");
            return ExitCode::from(2);
        }
    };

    let corpo = match std::fs::read_to_string(request_path) {
        Ok(corpo) => corpo,
        Err(e) => {
            imprimir_erro(&format!("Erro ao ler a requisição: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let request: GerarCronogramaRequest = match serde_json::from_str(&corpo) {
        Ok(request) => request,
        Err(e) => {
            imprimir_erro(&format!("Erro ao processar dados da requisição: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let db_path = get_default_db_path();
    tracing::info!(%db_path, "usando banco de dados");

    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            imprimir_erro(&e);
            return ExitCode::FAILURE;
        }
    };

    // Id do chamador autenticado: do ambiente em integração; na
    // execução local confiável assume o aluno da própria requisição
    let usuario_autenticado =
        std::env::var("CRONOGRAMA_ALUNO").unwrap_or_else(|_| request.aluno_id.clone());

    match app_state.cronograma_api.gerar(&usuario_autenticado, &request) {
        Ok(ResultadoGeracao::Gerado(gerado)) => {
            let resposta = serde_json::json!({
                "success": true,
                "cronograma": gerado.cronograma,
                "estatisticas": gerado.estatisticas,
            });
            println!("{}", resposta);
            ExitCode::SUCCESS
        }
        Ok(ResultadoGeracao::TempoInsuficiente(detalhes)) => {
            let resposta = serde_json::json!({
                "error": i18n::t("cronograma.tempo_insuficiente"),
                "detalhes": detalhes,
            });
            println!("{}", resposta);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(categoria = e.categoria(), erro = %e, "falha na geração");
            imprimir_erro(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Imprime um erro no mesmo formato estruturado das respostas.
fn imprimir_erro(mensagem: &str) {
    let resposta = serde_json::json!({ "error": mensagem });
    println!("{}", resposta);
}
