// ==========================================
// Motor de Cronogramas - Tipos de domínio
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Modalidade de estudo
// ==========================================
// Paralelo: todas as frentes avançam simultaneamente,
//           proporcionalmente ao volume de conteúdo.
// Sequencial: conclui uma frente antes de iniciar a próxima.
//
// Formato serializado: minúsculas (compatível com o payload
// dos clientes; os nomes em inglês são aceitos como alias).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalidadeEstudo {
    #[serde(rename = "paralelo", alias = "parallel")]
    Paralelo,
    #[serde(rename = "sequencial", alias = "sequential")]
    Sequencial,
}

impl fmt::Display for ModalidadeEstudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalidadeEstudo::Paralelo => write!(f, "paralelo"),
            ModalidadeEstudo::Sequencial => write!(f, "sequencial"),
        }
    }
}

impl FromStr for ModalidadeEstudo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paralelo" | "parallel" => Ok(ModalidadeEstudo::Paralelo),
            "sequencial" | "sequential" => Ok(ModalidadeEstudo::Sequencial),
            outro => Err(format!("modalidade de estudo desconhecida: {}", outro)),
        }
    }
}
