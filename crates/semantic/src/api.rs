use serde_json::{json, Value};
use std::time::Duration;

use crate::{EmbeddingConfig, SemanticError};

/// Feature-extraction endpoint client.
#[derive(Debug, Clone)]
pub(crate) struct ApiEmbedder {
    http: reqwest::Client,
    url: String,
    auth_header: Option<String>,
}

impl ApiEmbedder {
    pub(crate) fn new(cfg: &EmbeddingConfig) -> Result<Self, SemanticError> {
        let url = cfg
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                SemanticError::InvalidConfig("api_url is required for api mode".into())
            })?;
        if cfg.api_timeout_secs == 0 {
            return Err(SemanticError::InvalidConfig(
                "api_timeout_secs must be greater than zero".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.api_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| SemanticError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self {
            http,
            url: url.to_string(),
            auth_header: cfg.api_auth_header.clone(),
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Embeds one text. The returned vector is not yet normalized.
    pub(crate) async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let payload = json!({ "inputs": text });
        let response = self.send_api_request(payload).await?;
        parse_embedding(response)
    }

    async fn send_api_request(&self, payload: Value) -> Result<Value, SemanticError> {
        let mut request = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json");
        if let Some(header) = self.auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| SemanticError::Request(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SemanticError::Request(format!("HTTP error {status}: {body}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SemanticError::Inference(format!("Invalid JSON response: {e}")))
    }
}

/// Reads one embedding from the common response shapes:
///
/// - `[f, f, ...]` (pooled sentence vector)
/// - `[[f, ...]]` (batch of one)
/// - `[[f, ...], [f, ...], ...]` (per-token vectors, mean pooled here)
/// - `{"embeddings": ...}` or `{"data": [{"embedding": [...]}]}`
pub(crate) fn parse_embedding(value: Value) -> Result<Vec<f32>, SemanticError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_embedding(embeddings);
            }
            if let Some(Value::Array(items)) = map.remove("data") {
                if let Some(Value::Object(mut first)) = items.into_iter().next() {
                    if let Some(embedding) = first.remove("embedding") {
                        return parse_embedding(embedding);
                    }
                }
            }
            Err(SemanticError::Inference(
                "response object has no embedding".into(),
            ))
        }
        Value::Array(items) => {
            if items.is_empty() {
                return Err(SemanticError::Inference("empty embedding".into()));
            }
            if items.iter().all(Value::is_number) {
                return to_floats(&items);
            }
            let rows = items
                .into_iter()
                .map(|row| match row {
                    Value::Array(inner) if inner.iter().all(Value::is_number) => to_floats(&inner),
                    Value::Array(inner) => parse_embedding(Value::Array(inner)),
                    _ => Err(SemanticError::Inference("mixed embedding array".into())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            mean_rows(rows)
        }
        _ => Err(SemanticError::Inference(
            "unrecognized embedding response".into(),
        )),
    }
}

fn to_floats(items: &[Value]) -> Result<Vec<f32>, SemanticError> {
    items
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| SemanticError::Inference("non-numeric embedding value".into()))
        })
        .collect()
}

fn mean_rows(rows: Vec<Vec<f32>>) -> Result<Vec<f32>, SemanticError> {
    let mut rows = rows.into_iter();
    let mut sum = rows
        .next()
        .ok_or_else(|| SemanticError::Inference("empty embedding".into()))?;
    let mut count = 1.0f32;
    for row in rows {
        if row.len() != sum.len() {
            return Err(SemanticError::Inference("ragged token embeddings".into()));
        }
        for (s, v) in sum.iter_mut().zip(row) {
            *s += v;
        }
        count += 1.0;
    }
    if count > 1.0 {
        for s in &mut sum {
            *s /= count;
        }
    }
    Ok(sum)
}
