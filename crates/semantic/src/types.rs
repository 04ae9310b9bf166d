use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::SemanticError;

/// Width of every embedding textlens returns.
pub const EMBEDDING_DIM: usize = 384;

/// The all-zero vector returned whenever no real embedding is available.
pub fn zero_embedding() -> Vec<f32> {
    vec![0.0; EMBEDDING_DIM]
}

/// Which backend produces embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    Off,
    Onnx,
    Api,
}

impl EmbeddingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingMode::Off => "off",
            EmbeddingMode::Onnx => "onnx",
            EmbeddingMode::Api => "api",
        }
    }
}

impl FromStr for EmbeddingMode {
    type Err = SemanticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "" => Ok(EmbeddingMode::Off),
            "onnx" | "local" => Ok(EmbeddingMode::Onnx),
            "api" => Ok(EmbeddingMode::Api),
            other => Err(SemanticError::InvalidConfig(format!(
                "unknown embedding mode '{other}' (expected off, onnx or api)"
            ))),
        }
    }
}

impl fmt::Display for EmbeddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
