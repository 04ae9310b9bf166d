use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Embedding backend configuration.
///
/// # Example
/// ```
/// use semantic::EmbeddingConfig;
///
/// let cfg = EmbeddingConfig {
///     mode: "api".into(),
///     api_url: Some("https://router.huggingface.co/hf-inference/models/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction".into()),
///     api_auth_header: Some("Bearer hf_xxx".into()),
///     ..Default::default()
/// };
/// assert_eq!(cfg.max_sequence_length, 256);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `"off"` (zero vectors), `"onnx"` (local model) or `"api"` (remote HTTP).
    pub mode: String,
    /// Label reported by the readiness probe.
    pub model_name: String,
    /// Local ONNX model file, used in `"onnx"` mode.
    pub model_path: PathBuf,
    /// `tokenizer.json` matching the model, used in `"onnx"` mode.
    pub tokenizer_path: PathBuf,
    /// Token limit applied by the tokenizer before inference.
    pub max_sequence_length: usize,
    /// Feature-extraction endpoint, used in `"api"` mode.
    pub api_url: Option<String>,
    /// Authorization header (e.g., `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Overall API timeout in seconds.
    pub api_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            mode: "off".into(),
            model_name: "all-MiniLM-L6-v2".into(),
            model_path: PathBuf::from("./models/all-MiniLM-L6-v2/model.onnx"),
            tokenizer_path: PathBuf::from("./models/all-MiniLM-L6-v2/tokenizer.json"),
            max_sequence_length: 256,
            api_url: None,
            api_auth_header: None,
            api_timeout_secs: 30,
        }
    }
}
