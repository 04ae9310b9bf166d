use std::io;
use thiserror::Error;

/// Errors raised while building or running an embedding backend.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// The ONNX model file is not where the config says.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The tokenizer JSON is not where the config says.
    #[error("tokenizer missing: {0}")]
    TokenizerMissing(String),
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    /// HTTP transport or status failure in API mode.
    #[error("request failed: {0}")]
    Request(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// ONNX Runtime, tokenizer or response decoding errors.
    #[error("inference failure: {0}")]
    Inference(String),
}

impl SemanticError {
    /// True for errors that mean "no model on disk" rather than a broken one.
    pub fn is_missing_asset(&self) -> bool {
        matches!(
            self,
            SemanticError::ModelNotFound(_) | SemanticError::TokenizerMissing(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = SemanticError::ModelNotFound("/path/to/model.onnx".into());
        assert_eq!(err.to_string(), "model file not found: /path/to/model.onnx");

        let err = SemanticError::InvalidConfig("unknown mode".into());
        assert!(err.to_string().contains("invalid embedding config"));
    }

    #[test]
    fn error_from_io() {
        let err: SemanticError = io::Error::other("disk").into();
        assert!(err.to_string().contains("io error"));
        assert!(!err.is_missing_asset());
    }

    #[test]
    fn missing_asset_classification() {
        assert!(SemanticError::ModelNotFound("m".into()).is_missing_asset());
        assert!(SemanticError::TokenizerMissing("t".into()).is_missing_asset());
        assert!(!SemanticError::Inference("x".into()).is_missing_asset());
    }
}
