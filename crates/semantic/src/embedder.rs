#[cfg(feature = "onnx")]
use std::sync::Arc;

use ingest::{is_blank, truncate_chars, FallbackReason, Outcome};
use tracing::{debug, warn};

use crate::api::ApiEmbedder;
#[cfg(feature = "onnx")]
use crate::assets::resolve_model_assets;
use crate::normalize::l2_normalize_in_place;
use crate::types::{zero_embedding, EmbeddingMode, EMBEDDING_DIM};
use crate::{EmbeddingConfig, SemanticError};

/// Longest input embedded, in characters.
pub const MAX_EMBEDDING_INPUT_CHARS: usize = 512;

enum Backend {
    Disabled,
    Api(ApiEmbedder),
    #[cfg(feature = "onnx")]
    Onnx(Arc<crate::onnx::OnnxEmbedder>),
}

/// Turns text into unit-length 384-dimensional vectors.
///
/// Never fails at call time: every problem yields the zero vector, tagged
/// with the reason.
pub struct Embedder {
    backend: Backend,
    model_name: String,
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("backend", &self.backend_name())
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl Default for Embedder {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Embedder {
    /// Builds the backend selected by `cfg.mode`.
    ///
    /// Missing local model files, or `"onnx"` in a build without the `onnx`
    /// feature, log a warning and give a disabled embedder. A bad mode or a
    /// missing API URL is an error.
    pub fn new(cfg: &EmbeddingConfig) -> Result<Self, SemanticError> {
        let mode: EmbeddingMode = cfg.mode.parse()?;
        let backend = match mode {
            EmbeddingMode::Off => Backend::Disabled,
            EmbeddingMode::Api => Backend::Api(ApiEmbedder::new(cfg)?),
            EmbeddingMode::Onnx => onnx_backend(cfg)?,
        };
        let embedder = Self {
            backend,
            model_name: cfg.model_name.clone(),
        };
        debug!(backend = embedder.backend_name(), model = %embedder.model_name, "embedder_ready");
        Ok(embedder)
    }

    /// An embedder that always returns the zero vector.
    pub fn disabled() -> Self {
        Self {
            backend: Backend::Disabled,
            model_name: String::new(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Disabled => EmbeddingMode::Off.as_str(),
            Backend::Api(_) => EmbeddingMode::Api.as_str(),
            #[cfg(feature = "onnx")]
            Backend::Onnx(_) => EmbeddingMode::Onnx.as_str(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn is_model_backed(&self) -> bool {
        !matches!(self.backend, Backend::Disabled)
    }

    /// Embeds the first 512 characters of `text`.
    ///
    /// Blank text, no backend, a failed call, or a vector of the wrong
    /// width all give 384 zeros. Real vectors are L2-normalized.
    pub async fn generate_embedding(&self, text: &str) -> Outcome<Vec<f32>> {
        if is_blank(text) {
            return Outcome::fallback(zero_embedding(), FallbackReason::EmptyInput);
        }
        let input = truncate_chars(text, MAX_EMBEDDING_INPUT_CHARS);

        let raw = match &self.backend {
            Backend::Disabled => {
                return Outcome::fallback(zero_embedding(), FallbackReason::ModelUnavailable)
            }
            Backend::Api(api) => api.embed(input).await.map_err(|e| {
                warn!(url = api.url(), error = %e, "embedding request failed");
                e
            }),
            #[cfg(feature = "onnx")]
            Backend::Onnx(model) => run_onnx(Arc::clone(model), input.to_string()).await,
        };

        match raw {
            Ok(mut vector) => {
                if vector.len() != EMBEDDING_DIM {
                    warn!(
                        got = vector.len(),
                        expected = EMBEDDING_DIM,
                        "embedding has wrong dimension"
                    );
                    return Outcome::fallback(
                        zero_embedding(),
                        FallbackReason::invalid_output(format!(
                            "expected {EMBEDDING_DIM} dimensions, got {}",
                            vector.len()
                        )),
                    );
                }
                if vector.iter().any(|x| !x.is_finite()) {
                    warn!("embedding contains non-finite values");
                    return Outcome::fallback(
                        zero_embedding(),
                        FallbackReason::invalid_output("non-finite embedding values"),
                    );
                }
                l2_normalize_in_place(&mut vector);
                Outcome::Computed(vector)
            }
            Err(err) => {
                warn!(error = %err, "embedding failed, returning zero vector");
                Outcome::fallback(zero_embedding(), FallbackReason::model_failed(err.to_string()))
            }
        }
    }
}

#[cfg(feature = "onnx")]
fn onnx_backend(cfg: &EmbeddingConfig) -> Result<Backend, SemanticError> {
    let assets = match resolve_model_assets(cfg) {
        Ok(assets) => assets,
        Err(err) if err.is_missing_asset() => {
            warn!(error = %err, "embedding model files missing, embeddings disabled");
            return Ok(Backend::Disabled);
        }
        Err(err) => return Err(err),
    };
    let model = crate::onnx::OnnxEmbedder::load(&assets, cfg.max_sequence_length)?;
    Ok(Backend::Onnx(Arc::new(model)))
}

#[cfg(not(feature = "onnx"))]
fn onnx_backend(_cfg: &EmbeddingConfig) -> Result<Backend, SemanticError> {
    warn!("built without the `onnx` feature, embeddings disabled");
    Ok(Backend::Disabled)
}

#[cfg(feature = "onnx")]
async fn run_onnx(
    model: Arc<crate::onnx::OnnxEmbedder>,
    text: String,
) -> Result<Vec<f32>, SemanticError> {
    tokio::task::spawn_blocking(move || model.embed(&text))
        .await
        .map_err(|e| SemanticError::Inference(format!("embedding task: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    /// Answers one request with `body` and hands back the JSON it received.
    async fn serve_capture(body: String) -> (String, oneshot::Receiver<Value>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let request_body = loop {
                let n = socket.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    break Vec::new();
                }
                buf.extend_from_slice(&chunk[..n]);
                let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + len {
                    break buf[head_end + 4..head_end + 4 + len].to_vec();
                }
            };
            if let Ok(value) = serde_json::from_slice::<Value>(&request_body) {
                let _ = tx.send(value);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        (format!("http://{addr}/embed"), rx)
    }

    fn api_embedder(url: String) -> Embedder {
        Embedder::new(&EmbeddingConfig {
            mode: "api".into(),
            api_url: Some(url),
            ..EmbeddingConfig::default()
        })
        .unwrap()
    }

    async fn closed_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/embed")
    }

    #[tokio::test]
    async fn disabled_returns_zero_vector() {
        let embedder = Embedder::disabled();
        let out = embedder.generate_embedding("hello world").await;
        assert_eq!(out.value().len(), EMBEDDING_DIM);
        assert!(out.value().iter().all(|x| *x == 0.0));
        assert_eq!(out.reason(), Some(&FallbackReason::ModelUnavailable));
    }

    #[tokio::test]
    async fn blank_text_returns_zero_vector() {
        let out = Embedder::disabled().generate_embedding("  ").await;
        assert_eq!(out.value(), &zero_embedding());
        assert_eq!(out.reason(), Some(&FallbackReason::EmptyInput));
    }

    #[test]
    fn off_mode_is_disabled() {
        let embedder = Embedder::new(&EmbeddingConfig::default()).unwrap();
        assert_eq!(embedder.backend_name(), "off");
        assert!(!embedder.is_model_backed());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let cfg = EmbeddingConfig {
            mode: "magic".into(),
            ..EmbeddingConfig::default()
        };
        assert!(matches!(
            Embedder::new(&cfg),
            Err(SemanticError::InvalidConfig(_))
        ));
    }

    #[test]
    fn onnx_without_model_files_is_disabled() {
        let cfg = EmbeddingConfig {
            mode: "onnx".into(),
            model_path: "/nonexistent/model.onnx".into(),
            ..EmbeddingConfig::default()
        };
        let embedder = Embedder::new(&cfg).unwrap();
        assert!(!embedder.is_model_backed());
    }

    #[tokio::test]
    async fn failed_api_call_returns_zero_vector() {
        let cfg = EmbeddingConfig {
            mode: "api".into(),
            api_url: Some(closed_url().await),
            ..EmbeddingConfig::default()
        };
        let embedder = Embedder::new(&cfg).unwrap();
        assert_eq!(embedder.backend_name(), "api");

        let out = embedder.generate_embedding("some text").await;
        assert_eq!(out.value(), &zero_embedding());
        assert!(matches!(out.reason(), Some(FallbackReason::ModelFailed { .. })));
    }

    #[tokio::test]
    async fn api_input_is_capped_at_512_chars() {
        let vector = serde_json::to_string(&vec![1.0f32; EMBEDDING_DIM]).unwrap();
        let (url, sent) = serve_capture(vector).await;
        let text = "日本語のテキスト。".repeat(100);
        let out = api_embedder(url).generate_embedding(&text).await;

        assert!(!out.is_fallback());
        let norm: f32 = out.value().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);

        let payload = sent.await.unwrap();
        let inputs = payload["inputs"].as_str().unwrap();
        assert_eq!(inputs.chars().count(), MAX_EMBEDDING_INPUT_CHARS);
        assert!(text.starts_with(inputs));
    }

    #[tokio::test]
    async fn wrong_width_from_api_is_zero_vector() {
        let (url, _sent) = serve_capture("[0.5, 0.5]".to_string()).await;
        let out = api_embedder(url).generate_embedding("hello").await;
        assert_eq!(out.value(), &zero_embedding());
        assert!(matches!(out.reason(), Some(FallbackReason::InvalidOutput { .. })));
    }
}
