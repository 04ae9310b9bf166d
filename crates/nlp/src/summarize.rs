use ingest::{trimmed_char_count, truncate_chars, FallbackReason, Outcome};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::client::InferenceClient;
use crate::config::SummarizerConfig;
use crate::error::NlpError;
use crate::sentences::leading_sentences;

/// Texts shorter than this (trimmed chars) are echoed, not summarized.
pub const SHORT_TEXT_CHARS: usize = 100;
/// Length of the echoed prefix for short or sentence-less texts.
pub const ECHO_CHARS: usize = 200;
/// Longest input sent to the model.
pub const MAX_MODEL_INPUT_CHARS: usize = 1024;
/// Sentences kept by the extractive fallback.
pub const FALLBACK_SENTENCES: usize = 3;

/// Abstractive summarizer with an extractive fallback.
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    cfg: SummarizerConfig,
    client: Option<InferenceClient>,
}

impl Summarizer {
    pub fn new(cfg: SummarizerConfig) -> Result<Self, NlpError> {
        let client = InferenceClient::from_endpoint(&cfg.endpoint)?;
        Ok(Self { cfg, client })
    }

    /// A summarizer that only ever runs its fallback.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn is_model_backed(&self) -> bool {
        self.client.is_some()
    }

    /// Summarizes `text` to at most `max_length` model tokens.
    ///
    /// `max_length` must be positive; request validation guarantees that.
    pub async fn summarize(&self, text: &str, max_length: usize) -> Outcome<String> {
        self.summarize_with_bounds(text, max_length, self.cfg.min_length)
            .await
    }

    /// Like [`summarize`](Self::summarize) with an explicit lower bound.
    /// `min_length` is clamped to `max_length`.
    pub async fn summarize_with_bounds(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Outcome<String> {
        let chars = trimmed_char_count(text);
        if chars < SHORT_TEXT_CHARS {
            let reason = if chars == 0 {
                FallbackReason::EmptyInput
            } else {
                FallbackReason::ShortInput {
                    chars,
                    threshold: SHORT_TEXT_CHARS,
                }
            };
            return Outcome::fallback(truncate_chars(text, ECHO_CHARS).to_string(), reason);
        }

        let Some(client) = &self.client else {
            return Outcome::fallback(fallback_summary(text), FallbackReason::ModelUnavailable);
        };

        let input = truncate_chars(text, MAX_MODEL_INPUT_CHARS);
        let min_length = min_length.min(max_length);
        match request_summary(client, input, max_length, min_length).await {
            Ok(summary) if !summary.trim().is_empty() => {
                debug!(
                    input_chars = input.chars().count(),
                    summary_chars = summary.chars().count(),
                    "summarized"
                );
                Outcome::Computed(summary)
            }
            Ok(_) => {
                warn!(url = client.url(), "summarizer returned an empty summary");
                Outcome::fallback(
                    fallback_summary(text),
                    FallbackReason::invalid_output("empty summary"),
                )
            }
            Err(err) => {
                warn!(url = client.url(), error = %err, "summarization failed, using fallback");
                Outcome::fallback(
                    fallback_summary(text),
                    FallbackReason::model_failed(err.to_string()),
                )
            }
        }
    }
}

/// Extractive summary: the first three sentences, or the first 200
/// characters when no sentence can be found.
pub fn fallback_summary(text: &str) -> String {
    leading_sentences(text, FALLBACK_SENTENCES)
        .unwrap_or_else(|| truncate_chars(text, ECHO_CHARS).to_string())
}

async fn request_summary(
    client: &InferenceClient,
    input: &str,
    max_length: usize,
    min_length: usize,
) -> Result<String, NlpError> {
    let payload = json!({
        "inputs": input,
        "parameters": {
            "max_length": max_length,
            "min_length": min_length,
            "do_sample": false,
        }
    });
    let response = client.post_json(&payload).await?;
    parse_summary(response)
}

/// Reads `[{"summary_text": ...}]`; a bare object or `generated_text` is
/// accepted as well.
fn parse_summary(value: Value) -> Result<String, NlpError> {
    let first = match value {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };
    match first {
        Some(Value::Object(mut obj)) => {
            let text = obj
                .remove("summary_text")
                .or_else(|| obj.remove("generated_text"));
            match text {
                Some(Value::String(s)) => Ok(s),
                _ => Err(NlpError::Response(
                    "missing summary_text in model output".into(),
                )),
            }
        }
        Some(Value::String(s)) => Ok(s),
        _ => Err(NlpError::Response("unrecognized summary output".into())),
    }
}
