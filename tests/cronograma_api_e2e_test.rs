// ==========================================
// Teste E2E - API de geração de cronogramas
// ==========================================
// Fluxo completo: requisição -> resolução do catálogo ->
// engine -> persistência -> releitura, contra um banco
// SQLite temporário.
// ==========================================


use rusqlite::Connection;
use tempfile::NamedTempFile;

use cronograma_engine::api::{ApiError, ResultadoGeracao};
use cronograma_engine::app::AppState;
use cronograma_engine::domain::cronograma::CronogramaItemDetalhado;
use cronograma_engine::domain::types::ModalidadeEstudo;
use cronograma_engine::domain::PeriodoFerias;
use cronograma_engine::CronogramaGerado;

use test_helpers::*;

// ==========================================
// Auxiliares
// ==========================================

fn setup() -> (NamedTempFile, Connection, AppState) {
    cronograma_engine::logging::init_test();
    let (temp_file, db_path) = create_test_db().expect("falha ao criar banco de teste");
    let conn = open_test_connection(&db_path).expect("falha ao abrir conexão de seed");
    let state = AppState::new(db_path).expect("falha ao inicializar AppState");
    (temp_file, conn, state)
}

fn gerar_ok(state: &AppState, aluno: &str, request: &cronograma_engine::GerarCronogramaRequest) -> CronogramaGerado {
    match state.cronograma_api.gerar(aluno, request).expect("geração falhou") {
        ResultadoGeracao::Gerado(gerado) => gerado,
        ResultadoGeracao::TempoInsuficiente(detalhes) => {
            panic!("esperava cronograma gerado, veio tempo insuficiente: {:?}", detalhes)
        }
    }
}

fn itens_da_semana(itens: &[CronogramaItemDetalhado], numero: i32) -> Vec<&CronogramaItemDetalhado> {
    itens.iter().filter(|i| i.semana_numero == numero).collect()
}

// ==========================================
// Cenário A: frente única, semana única
// ==========================================

#[test]
fn test_frente_unica_todas_as_aulas_na_semana_um() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    for modalidade in [ModalidadeEstudo::Paralelo, ModalidadeEstudo::Sequencial] {
        let mut request = request_base("aluno-1");
        request.modalidade = modalidade;

        let gerado = gerar_ok(&state, "aluno-1", &request);

        // Custos 30/45/15 (x1.5), total 90 <= 600
        assert_eq!(gerado.estatisticas.total_aulas, 3);
        assert_eq!(gerado.estatisticas.total_semanas, 1);
        assert_eq!(gerado.estatisticas.semanas_uteis, 1);
        assert_eq!(gerado.estatisticas.capacidade_total_minutos, 600.0);
        assert_eq!(gerado.estatisticas.custo_total_minutos, 90.0);
        assert_eq!(gerado.estatisticas.frentes_distribuidas, 1);

        let itens = &gerado.cronograma.itens;
        assert_eq!(itens.len(), 3);
        // Ordem original preservada, ordem_na_semana 1..3
        let resumo: Vec<(&str, i32, i32)> = itens
            .iter()
            .map(|i| (i.aula_id.as_str(), i.semana_numero, i.ordem_na_semana))
            .collect();
        assert_eq!(
            resumo,
            vec![("aula-1", 1, 1), ("aula-2", 1, 2), ("aula-3", 1, 3)]
        );
    }
}

// ==========================================
// Cenário B: modalidade paralela intercala frentes
// ==========================================

#[test]
fn test_paralelo_intercala_frentes_por_semana() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_duas_frentes(&conn);

    let mut request = request_base("aluno-1");
    // 2 semanas de 300 min; custo total 600 (10 aulas de 60)
    request.data_fim = chrono::NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
    request.horas_dia = 1.0;
    request.modalidade = ModalidadeEstudo::Paralelo;

    let gerado = gerar_ok(&state, "aluno-1", &request);
    let itens = &gerado.cronograma.itens;

    assert_eq!(itens.len(), 10);
    assert_eq!(gerado.estatisticas.frentes_distribuidas, 2);

    // Cada aula aparece exatamente uma vez
    let mut ids: Vec<&str> = itens.iter().map(|i| i.aula_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);

    // Cada semana recebe conteúdo das duas frentes, em contagens
    // aproximadamente iguais (pesos 0.5/0.5)
    for numero in [1, 2] {
        let da_semana = itens_da_semana(itens, numero);
        let de_a = da_semana.iter().filter(|i| i.aula_id.starts_with("aula-a")).count();
        let de_b = da_semana.len() - de_a;
        assert!(de_a >= 1, "semana {} sem aulas da frente A", numero);
        assert!(de_b >= 1, "semana {} sem aulas da frente B", numero);
        assert!(de_a.abs_diff(de_b) <= 1);
    }
}

// ==========================================
// Cenário C: modalidade sequencial drena frente a frente
// ==========================================

#[test]
fn test_sequencial_conclui_frente_antes_da_proxima() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_duas_frentes(&conn);

    let mut request = request_base("aluno-1");
    request.data_fim = chrono::NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
    request.horas_dia = 1.0;
    request.modalidade = ModalidadeEstudo::Sequencial;

    let gerado = gerar_ok(&state, "aluno-1", &request);
    let itens = &gerado.cronograma.itens;

    assert_eq!(itens.len(), 10);

    // Itens já vêm ordenados por (semana, ordem): nenhuma aula da
    // frente B pode aparecer antes da última da frente A
    let ultima_de_a = itens
        .iter()
        .rposition(|i| i.aula_id.starts_with("aula-a"))
        .unwrap();
    let primeira_de_b = itens
        .iter()
        .position(|i| i.aula_id.starts_with("aula-b"))
        .unwrap();
    assert!(ultima_de_a < primeira_de_b);
}

#[test]
fn test_sequencial_respeita_ordem_de_preferencia() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_duas_frentes(&conn);

    let mut request = request_base("aluno-1");
    request.data_fim = chrono::NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
    request.horas_dia = 1.0;
    request.modalidade = ModalidadeEstudo::Sequencial;
    request.ordem_frentes_preferencia = Some(vec!["Frente B".to_string()]);

    let gerado = gerar_ok(&state, "aluno-1", &request);
    let itens = &gerado.cronograma.itens;

    // Frente B inteira antes de qualquer aula da frente A
    let ultima_de_b = itens
        .iter()
        .rposition(|i| i.aula_id.starts_with("aula-b"))
        .unwrap();
    let primeira_de_a = itens
        .iter()
        .position(|i| i.aula_id.starts_with("aula-a"))
        .unwrap();
    assert!(ultima_de_b < primeira_de_a);
}

// ==========================================
// Cenário D: férias bloqueiam a semana do meio
// ==========================================

#[test]
fn test_ferias_deslocam_conteudo_para_semanas_uteis() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    let mut request = request_base("aluno-1");
    // 3 semanas; a segunda inteira em férias; 60 min/semana útil
    request.data_fim = chrono::NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
    request.horas_dia = 1.0;
    request.dias_semana = 1;
    request.ferias = vec![PeriodoFerias {
        inicio: chrono::NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
        fim: chrono::NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
    }];

    let gerado = gerar_ok(&state, "aluno-1", &request);

    assert_eq!(gerado.estatisticas.total_semanas, 3);
    assert_eq!(gerado.estatisticas.semanas_uteis, 2);
    assert_eq!(gerado.estatisticas.capacidade_total_minutos, 120.0);

    let itens = &gerado.cronograma.itens;
    assert_eq!(itens.len(), 3);
    assert!(itens_da_semana(itens, 2).is_empty(), "semana de férias recebeu item");
    assert_eq!(itens_da_semana(itens, 1).len(), 1);
    assert_eq!(itens_da_semana(itens, 3).len(), 2);
}

// ==========================================
// Cenário E: tempo insuficiente não persiste nada
// ==========================================

#[test]
fn test_tempo_insuficiente_sem_efeito_no_banco() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    let mut request = request_base("aluno-1");
    // 1 semana útil de 60 min; custo total 90
    request.horas_dia = 1.0;
    request.dias_semana = 1;

    let resultado = state
        .cronograma_api
        .gerar("aluno-1", &request)
        .expect("inviabilidade não é erro");

    match resultado {
        ResultadoGeracao::TempoInsuficiente(detalhes) => {
            assert_eq!(detalhes.horas_necessarias, 2); // ceil(90/60)
            assert_eq!(detalhes.horas_disponiveis, 1);
            assert!(detalhes.horas_necessarias > detalhes.horas_disponiveis);
            assert_eq!(detalhes.horas_dia_necessarias, 1.5); // 1.5h em 1 dia útil
            assert_eq!(detalhes.horas_dia_atual, 1.0);
        }
        ResultadoGeracao::Gerado(_) => panic!("esperava tempo insuficiente"),
    }

    // Nenhum efeito colateral de persistência
    assert_eq!(count_rows(&conn, "cronogramas"), 0);
    assert_eq!(count_rows(&conn, "cronograma_itens"), 0);
}

// ==========================================
// Filtros do conjunto candidato
// ==========================================

#[test]
fn test_exclui_aulas_concluidas_da_fonte_primaria() {
    let (_tmp, conn, state) = setup();
    seed_disciplina(&conn, "disc-1", "Matemática");
    seed_frente(&conn, "frente-1", "Álgebra", "disc-1", Some("curso-1"));
    seed_modulo(&conn, "mod-1", "Equações", Some(1), "frente-1", Some("curso-1"));
    for i in 1..=3 {
        seed_aula(
            &conn,
            &format!("aula-{}", i),
            &format!("Aula {}", i),
            Some(i),
            Some(20),
            1,
            "mod-1",
            Some("curso-1"),
        );
    }
    seed_aula_concluida(&conn, "aluno-1", "curso-1", "aula-1");

    let mut request = request_base("aluno-1");
    request.curso_alvo_id = Some("curso-1".to_string());

    let gerado = gerar_ok(&state, "aluno-1", &request);

    assert_eq!(gerado.estatisticas.total_aulas, 2);
    let ids: Vec<&str> = gerado
        .cronograma
        .itens
        .iter()
        .map(|i| i.aula_id.as_str())
        .collect();
    assert_eq!(ids, vec!["aula-2", "aula-3"]);
}

#[test]
fn test_exclui_concluidas_pelo_historico_quando_fonte_primaria_vazia() {
    let (_tmp, conn, state) = setup();
    seed_disciplina(&conn, "disc-1", "Matemática");
    seed_frente(&conn, "frente-1", "Álgebra", "disc-1", Some("curso-1"));
    seed_modulo(&conn, "mod-1", "Equações", Some(1), "frente-1", Some("curso-1"));
    for i in 1..=3 {
        seed_aula(
            &conn,
            &format!("aula-{}", i),
            &format!("Aula {}", i),
            Some(i),
            Some(20),
            1,
            "mod-1",
            Some("curso-1"),
        );
    }

    // Cronograma antigo com a aula-2 marcada como concluída
    conn.execute(
        r#"INSERT INTO cronogramas (
            id, aluno_id, curso_alvo_id, nome, data_inicio, data_fim,
            dias_estudo_semana, horas_estudo_dia, modalidade_estudo, created_at
        ) VALUES ('antigo', 'aluno-1', 'curso-1', 'Plano antigo', '2025-08-04', '2025-12-14',
                  5, 2.0, 'paralelo', '2025-08-01 10:00:00')"#,
        [],
    )
    .unwrap();
    conn.execute(
        r#"INSERT INTO cronograma_itens (id, cronograma_id, aula_id, semana_numero, ordem_na_semana, concluido)
           VALUES ('item-antigo', 'antigo', 'aula-2', 1, 1, 1)"#,
        [],
    )
    .unwrap();

    let mut request = request_base("aluno-1");
    request.curso_alvo_id = Some("curso-1".to_string());

    let gerado = gerar_ok(&state, "aluno-1", &request);

    assert_eq!(gerado.estatisticas.total_aulas, 2);
    assert!(gerado
        .cronograma
        .itens
        .iter()
        .all(|i| i.aula_id != "aula-2"));
}

#[test]
fn test_sem_exclusao_quando_desabilitada() {
    let (_tmp, conn, state) = setup();
    seed_disciplina(&conn, "disc-1", "Matemática");
    seed_frente(&conn, "frente-1", "Álgebra", "disc-1", Some("curso-1"));
    seed_modulo(&conn, "mod-1", "Equações", Some(1), "frente-1", Some("curso-1"));
    seed_aula(&conn, "aula-1", "Aula 1", Some(1), Some(20), 1, "mod-1", Some("curso-1"));
    seed_aula_concluida(&conn, "aluno-1", "curso-1", "aula-1");

    let mut request = request_base("aluno-1");
    request.curso_alvo_id = Some("curso-1".to_string());
    request.excluir_aulas_concluidas = Some(false);

    let gerado = gerar_ok(&state, "aluno-1", &request);

    assert_eq!(gerado.estatisticas.total_aulas, 1);
    assert_eq!(gerado.cronograma.itens.len(), 1);
}

#[test]
fn test_prioridade_zero_sempre_fora_do_conjunto() {
    let (_tmp, conn, state) = setup();
    seed_disciplina(&conn, "disc-1", "Matemática");
    seed_frente(&conn, "frente-1", "Álgebra", "disc-1", None);
    seed_modulo(&conn, "mod-1", "Equações", Some(1), "frente-1", None);
    seed_aula(&conn, "aula-extra", "Aula extra", Some(1), Some(20), 0, "mod-1", None);
    seed_aula(&conn, "aula-plano", "Aula do plano", Some(2), Some(20), 1, "mod-1", None);

    // prioridade_minima 0 é elevada para 1; a aula de prioridade 0 fica fora
    let mut request = request_base("aluno-1");
    request.prioridade_minima = Some(0);

    let gerado = gerar_ok(&state, "aluno-1", &request);

    assert_eq!(gerado.estatisticas.total_aulas, 1);
    assert_eq!(gerado.cronograma.itens[0].aula_id, "aula-plano");
}

#[test]
fn test_filtro_de_modulos_restringe_conjunto() {
    let (_tmp, conn, state) = setup();
    seed_disciplina(&conn, "disc-1", "Matemática");
    seed_frente(&conn, "frente-1", "Álgebra", "disc-1", None);
    seed_modulo(&conn, "mod-1", "Equações", Some(1), "frente-1", None);
    seed_modulo(&conn, "mod-2", "Funções", Some(2), "frente-1", None);
    seed_aula(&conn, "aula-1", "Aula 1", Some(1), Some(20), 1, "mod-1", None);
    seed_aula(&conn, "aula-2", "Aula 2", Some(1), Some(20), 1, "mod-2", None);

    let mut request = request_base("aluno-1");
    request.modulos_ids = vec!["mod-2".to_string()];

    let gerado = gerar_ok(&state, "aluno-1", &request);

    assert_eq!(gerado.estatisticas.total_aulas, 1);
    assert_eq!(gerado.cronograma.itens[0].aula_id, "aula-2");
}

// ==========================================
// Erros de validação e resolução vazia
// ==========================================

#[test]
fn test_aluno_diferente_do_autenticado_rejeitado() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    let request = request_base("aluno-1");
    let erro = state
        .cronograma_api
        .gerar("outro-aluno", &request)
        .unwrap_err();

    assert!(matches!(erro, ApiError::AcessoNegado));
    assert_eq!(count_rows(&conn, "cronogramas"), 0);
}

#[test]
fn test_resolucao_vazia_por_etapa() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    // Disciplina desconhecida: nenhuma frente
    let mut request = request_base("aluno-1");
    request.disciplinas_ids = vec!["disc-inexistente".to_string()];
    assert!(matches!(
        state.cronograma_api.gerar("aluno-1", &request),
        Err(ApiError::NenhumaFrenteEncontrada)
    ));

    // Filtro de módulos sem interseção: nenhum módulo
    let mut request = request_base("aluno-1");
    request.modulos_ids = vec!["mod-inexistente".to_string()];
    assert!(matches!(
        state.cronograma_api.gerar("aluno-1", &request),
        Err(ApiError::NenhumModuloEncontrado)
    ));

    // Prioridade mínima acima de todas as aulas: nenhuma aula
    let mut request = request_base("aluno-1");
    request.prioridade_minima = Some(5);
    assert!(matches!(
        state.cronograma_api.gerar("aluno-1", &request),
        Err(ApiError::NenhumaAulaEncontrada)
    ));
}

#[test]
fn test_todas_as_aulas_concluidas() {
    let (_tmp, conn, state) = setup();
    seed_disciplina(&conn, "disc-1", "Matemática");
    seed_frente(&conn, "frente-1", "Álgebra", "disc-1", Some("curso-1"));
    seed_modulo(&conn, "mod-1", "Equações", Some(1), "frente-1", Some("curso-1"));
    seed_aula(&conn, "aula-1", "Aula 1", Some(1), Some(20), 1, "mod-1", Some("curso-1"));
    seed_aula_concluida(&conn, "aluno-1", "curso-1", "aula-1");

    let mut request = request_base("aluno-1");
    request.curso_alvo_id = Some("curso-1".to_string());

    assert!(matches!(
        state.cronograma_api.gerar("aluno-1", &request),
        Err(ApiError::NenhumaAulaRestante)
    ));
}

#[test]
fn test_ferias_cobrindo_todo_o_horizonte() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    let mut request = request_base("aluno-1");
    request.ferias = vec![PeriodoFerias {
        inicio: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        fim: chrono::NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
    }];

    assert!(matches!(
        state.cronograma_api.gerar("aluno-1", &request),
        Err(ApiError::PeriodoSemSemanasUteis)
    ));
    assert_eq!(count_rows(&conn, "cronogramas"), 0);
}

// ==========================================
// Persistência e releitura
// ==========================================

#[test]
fn test_cabecalho_persistido_com_padroes_efetivos() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_frente_unica(&conn);

    let request = request_base("aluno-1");
    let gerado = gerar_ok(&state, "aluno-1", &request);

    let cronograma = &gerado.cronograma.cronograma;
    assert_eq!(cronograma.nome, "Meu Cronograma");
    assert_eq!(cronograma.prioridade_minima, 1);
    assert!(cronograma.excluir_aulas_concluidas);
    assert_eq!(cronograma.modalidade_estudo, ModalidadeEstudo::Paralelo);
    assert_eq!(cronograma.disciplinas_selecionadas, vec!["disc-1".to_string()]);

    // Persistido e relido do banco, com detalhe das aulas no join
    assert_eq!(count_rows(&conn, "cronogramas"), 1);
    assert_eq!(count_rows(&conn, "cronograma_itens"), 3);
    assert_eq!(gerado.cronograma.itens[0].aula_nome, "Aula 1");
    assert_eq!(gerado.cronograma.itens[0].tempo_estimado_minutos, Some(20));
    assert!(!gerado.cronograma.itens[0].concluido);
}

#[test]
fn test_capacidade_semanal_respeitada_no_resultado_persistido() {
    let (_tmp, conn, state) = setup();
    seed_catalogo_duas_frentes(&conn);

    let mut request = request_base("aluno-1");
    request.data_fim = chrono::NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
    request.horas_dia = 1.0;

    let gerado = gerar_ok(&state, "aluno-1", &request);

    // Capacidade semanal 300; cada aula custa 60: no máximo 5 por semana
    for numero in [1, 2] {
        let na_semana = itens_da_semana(&gerado.cronograma.itens, numero).len();
        assert!(na_semana <= 5, "semana {} excedeu a capacidade", numero);
    }
    // Conservação: soma dos custos alocados (10 aulas x 60) dentro da
    // capacidade total (600)
    assert_eq!(gerado.cronograma.itens.len(), 10);
    assert!(gerado.estatisticas.custo_total_minutos <= gerado.estatisticas.capacidade_total_minutos);
}
