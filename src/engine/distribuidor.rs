// ==========================================
// Motor de Cronogramas - Distribuidor
// ==========================================
// Núcleo do algoritmo: aloca aulas nas semanas úteis sob
// uma de duas modalidades, preservando a ordem interna de
// cada frente e respeitando a capacidade semanal.
//
// Paralelo: cota proporcional por frente em cada semana,
// seguida de um passe de aproveitamento que ignora a cota.
// Sequencial: esgota uma frente antes de iniciar a próxima.
//
// Passe único, sem retries e sem backtracking.
// ==========================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::domain::aula::{AulaComCusto, Frente};
use crate::domain::calendario::Semana;
use crate::domain::types::ModalidadeEstudo;

// ==========================================
// ItemAlocado - saída do distribuidor
// ==========================================
// O id do cronograma é preenchido na persistência.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAlocado {
    pub aula_id: String,
    pub semana_numero: i32,
    pub ordem_na_semana: i32,
}

// ==========================================
// DistribuidorEngine
// ==========================================
pub struct DistribuidorEngine {
    // engine sem estado
}

impl DistribuidorEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // Preparação das frentes
    // ==========================================

    /// Agrupa a lista ordenada de aulas com custo por frente.
    ///
    /// A ordem das frentes segue a primeira ocorrência de cada uma na
    /// lista de entrada; a ordem das aulas dentro da frente é a ordem
    /// canônica da entrada e nunca muda durante a distribuição.
    pub fn agrupar_frentes(&self, aulas: &[AulaComCusto]) -> Vec<Frente> {
        let mut frentes: Vec<Frente> = Vec::new();
        let mut indice: HashMap<String, usize> = HashMap::new();

        for aula in aulas {
            let pos = *indice
                .entry(aula.aula.frente_id.clone())
                .or_insert_with(|| {
                    frentes.push(Frente {
                        frente_id: aula.aula.frente_id.clone(),
                        frente_nome: aula.aula.frente_nome.clone(),
                        aulas: Vec::new(),
                        custo_total: 0.0,
                        peso: 0.0,
                    });
                    frentes.len() - 1
                });
            frentes[pos].aulas.push(aula.clone());
            frentes[pos].custo_total += aula.custo;
        }

        frentes
    }

    /// Calcula o peso de cada frente (modalidade paralela):
    /// `peso = custo_total / custo_total_geral`.
    pub fn calcular_pesos(&self, frentes: &mut [Frente], custo_total_geral: f64) {
        for frente in frentes.iter_mut() {
            frente.peso = frente.custo_total / custo_total_geral;
        }
    }

    /// Reordena as frentes pela lista de preferência do aluno
    /// (modalidade sequencial).
    ///
    /// Frentes cujo nome consta na lista ordenam pelo índice da
    /// entrada; as demais ficam depois de todas as preferidas,
    /// mantendo entre si a ordem original (ordenação estável).
    pub fn ordenar_por_preferencia(&self, frentes: &mut [Frente], ordem: &[String]) {
        let ranking: HashMap<&str, usize> = ordem
            .iter()
            .enumerate()
            .map(|(idx, nome)| (nome.as_str(), idx))
            .collect();

        frentes.sort_by_key(|f| {
            ranking
                .get(f.frente_nome.as_str())
                .copied()
                .unwrap_or(usize::MAX)
        });
    }

    // ==========================================
    // Distribuição
    // ==========================================

    /// Distribui as aulas das frentes nas semanas úteis.
    ///
    /// Pré-condição: a viabilidade já foi confirmada (custo total
    /// dentro da capacidade total das semanas úteis). Semanas de
    /// férias nunca recebem itens.
    #[instrument(skip(self, frentes, semanas), fields(
        frentes_count = frentes.len(),
        semanas_count = semanas.len(),
        modalidade = %modalidade
    ))]
    pub fn distribuir(
        &self,
        frentes: &[Frente],
        semanas: &[Semana],
        modalidade: ModalidadeEstudo,
    ) -> Vec<ItemAlocado> {
        let itens = match modalidade {
            ModalidadeEstudo::Paralelo => self.distribuir_paralelo(frentes, semanas),
            ModalidadeEstudo::Sequencial => self.distribuir_sequencial(frentes, semanas),
        };

        let total_aulas: usize = frentes.iter().map(|f| f.aulas.len()).sum();
        if itens.len() < total_aulas {
            // Aula maior que a capacidade semanal, ou corte de fim de
            // semana no modo sequencial
            warn!(
                alocadas = itens.len(),
                total = total_aulas,
                "aulas sem alocação: custo individual excede a capacidade semanal"
            );
        }

        itens
    }

    /// Modalidade paralela: intercalação proporcional.
    ///
    /// Para cada semana útil, dois passes sobre as frentes na mesma
    /// ordem:
    /// 1) Passe de cota: cada frente consome do seu cursor enquanto
    ///    couber na cota (`capacidade * peso`) e na capacidade restante
    ///    da semana.
    /// 2) Passe de aproveitamento: ignora a cota e preenche a
    ///    capacidade que sobrou. Recupera o desperdício quando a cota
    ///    não divide em aulas inteiras ou quando uma frente esgotou.
    ///
    /// `ordem_na_semana` é um contador único da semana, compartilhado
    /// entre frentes e entre os dois passes.
    fn distribuir_paralelo(&self, frentes: &[Frente], semanas: &[Semana]) -> Vec<ItemAlocado> {
        let mut itens = Vec::new();
        let mut cursores = vec![0usize; frentes.len()];

        for semana in semanas.iter().filter(|s| s.is_util()) {
            let capacidade = semana.capacidade_minutos;
            let mut tempo_usado = 0.0;
            let mut ordem_na_semana = 1;

            // Passe 1: cota proporcional por frente
            for (idx, frente) in frentes.iter().enumerate() {
                let cota = capacidade * frente.peso;
                let mut tempo_frente = 0.0;

                while cursores[idx] < frente.aulas.len() {
                    let custo = frente.aulas[cursores[idx]].custo;
                    if tempo_frente + custo > cota || tempo_usado + custo > capacidade {
                        break;
                    }
                    itens.push(ItemAlocado {
                        aula_id: frente.aulas[cursores[idx]].aula.id.clone(),
                        semana_numero: semana.numero,
                        ordem_na_semana,
                    });
                    ordem_na_semana += 1;
                    tempo_frente += custo;
                    tempo_usado += custo;
                    cursores[idx] += 1;
                }
            }

            // Passe 2: aproveitamento da capacidade restante
            for (idx, frente) in frentes.iter().enumerate() {
                while cursores[idx] < frente.aulas.len() {
                    let custo = frente.aulas[cursores[idx]].custo;
                    if tempo_usado + custo > capacidade {
                        break;
                    }
                    itens.push(ItemAlocado {
                        aula_id: frente.aulas[cursores[idx]].aula.id.clone(),
                        semana_numero: semana.numero,
                        ordem_na_semana,
                    });
                    ordem_na_semana += 1;
                    tempo_usado += custo;
                    cursores[idx] += 1;
                }
            }
        }

        itens
    }

    /// Modalidade sequencial: frente a frente.
    ///
    /// Um único ponteiro de frente ativa atravessa as semanas. Frente
    /// esgotada avança o ponteiro dentro da mesma semana; aula que não
    /// cabe encerra a semana (a ordem dentro da frente é estrita, não
    /// se pula para uma aula posterior).
    fn distribuir_sequencial(&self, frentes: &[Frente], semanas: &[Semana]) -> Vec<ItemAlocado> {
        let mut itens = Vec::new();
        let mut cursores = vec![0usize; frentes.len()];
        let mut frente_idx = 0usize;

        for semana in semanas.iter().filter(|s| s.is_util()) {
            let capacidade = semana.capacidade_minutos;
            let mut tempo_usado = 0.0;
            let mut ordem_na_semana = 1;

            while frente_idx < frentes.len() && tempo_usado < capacidade {
                let frente = &frentes[frente_idx];
                if cursores[frente_idx] >= frente.aulas.len() {
                    frente_idx += 1;
                    continue;
                }

                let custo = frente.aulas[cursores[frente_idx]].custo;
                if tempo_usado + custo > capacidade {
                    break;
                }

                itens.push(ItemAlocado {
                    aula_id: frente.aulas[cursores[frente_idx]].aula.id.clone(),
                    semana_numero: semana.numero,
                    ordem_na_semana,
                });
                ordem_na_semana += 1;
                tempo_usado += custo;
                cursores[frente_idx] += 1;
            }
        }

        itens
    }
}

impl Default for DistribuidorEngine {
    fn default() -> Self {
        Self::new()
    }
}
