use std::path::{Path, PathBuf};

use crate::{EmbeddingConfig, SemanticError};

/// Model and tokenizer files for local inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelAssets {
    pub(crate) model_path: PathBuf,
    pub(crate) tokenizer_path: PathBuf,
}

/// Checks that both files named by `cfg` exist.
pub(crate) fn resolve_model_assets(cfg: &EmbeddingConfig) -> Result<ModelAssets, SemanticError> {
    let model_path = existing_file(&cfg.model_path)
        .ok_or_else(|| SemanticError::ModelNotFound(cfg.model_path.display().to_string()))?;
    let tokenizer_path = existing_file(&cfg.tokenizer_path)
        .ok_or_else(|| SemanticError::TokenizerMissing(cfg.tokenizer_path.display().to_string()))?;

    Ok(ModelAssets {
        model_path,
        tokenizer_path,
    })
}

fn existing_file(path: &Path) -> Option<PathBuf> {
    path.is_file().then(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_model_is_reported_first() {
        let cfg = EmbeddingConfig {
            model_path: PathBuf::from("/nonexistent/model.onnx"),
            tokenizer_path: PathBuf::from("/nonexistent/tokenizer.json"),
            ..EmbeddingConfig::default()
        };
        let err = resolve_model_assets(&cfg).unwrap_err();
        assert!(matches!(err, SemanticError::ModelNotFound(_)));
    }

    #[test]
    fn missing_tokenizer_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        fs::write(&model, b"onnx").unwrap();
        let cfg = EmbeddingConfig {
            model_path: model,
            tokenizer_path: dir.path().join("tokenizer.json"),
            ..EmbeddingConfig::default()
        };
        let err = resolve_model_assets(&cfg).unwrap_err();
        assert!(matches!(err, SemanticError::TokenizerMissing(_)));
    }

    #[test]
    fn resolves_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        let tokenizer = dir.path().join("tokenizer.json");
        fs::write(&model, b"onnx").unwrap();
        fs::write(&tokenizer, b"{}").unwrap();
        let cfg = EmbeddingConfig {
            model_path: model.clone(),
            tokenizer_path: tokenizer.clone(),
            ..EmbeddingConfig::default()
        };
        let assets = resolve_model_assets(&cfg).unwrap();
        assert_eq!(assets.model_path, model);
        assert_eq!(assets.tokenizer_path, tokenizer);
    }

    #[test]
    fn directory_is_not_a_model() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = EmbeddingConfig {
            model_path: dir.path().to_path_buf(),
            ..EmbeddingConfig::default()
        };
        assert!(resolve_model_assets(&cfg).is_err());
    }
}
