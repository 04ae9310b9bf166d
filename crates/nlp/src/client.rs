use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::config::EndpointConfig;
use crate::error::NlpError;

/// JSON-over-HTTP client for one hosted inference model.
#[derive(Debug, Clone)]
pub(crate) struct InferenceClient {
    http: reqwest::Client,
    url: String,
    auth_header: Option<String>,
}

impl InferenceClient {
    /// Builds a client for `cfg`, or `None` when no endpoint is configured.
    pub(crate) fn from_endpoint(cfg: &EndpointConfig) -> Result<Option<Self>, NlpError> {
        if !cfg.is_configured() {
            return Ok(None);
        }
        let url = cfg.api_url.as_deref().unwrap_or_default().trim().to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(NlpError::InvalidConfig(format!(
                "api_url must be an http(s) URL, got '{url}'"
            )));
        }
        if cfg.api_timeout_secs == 0 {
            return Err(NlpError::InvalidConfig(
                "api_timeout_secs must be greater than zero".into(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.api_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| NlpError::Client(e.to_string()))?;

        Ok(Some(Self {
            http,
            url,
            auth_header: cfg.api_auth_header.clone(),
        }))
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// POSTs `payload` and returns the decoded JSON body.
    pub(crate) async fn post_json(&self, payload: &Value) -> Result<Value, NlpError> {
        let mut request = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json");
        if let Some(header) = self.auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(payload)
            .send()
            .await
            .map_err(|e| NlpError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NlpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(url = %self.url, status = status.as_u16(), "inference_response");
        response
            .json::<Value>()
            .await
            .map_err(|e| NlpError::Response(format!("invalid JSON response: {e}")))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{closed_url, serve_once};
    use super::*;
    use serde_json::json;

    #[test]
    fn unconfigured_endpoint_has_no_client() {
        let client = InferenceClient::from_endpoint(&EndpointConfig::default()).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn rejects_non_http_url() {
        let err = InferenceClient::from_endpoint(&EndpointConfig::new("ftp://model")).unwrap_err();
        assert!(matches!(err, NlpError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = EndpointConfig {
            api_timeout_secs: 0,
            ..EndpointConfig::new("http://localhost:1")
        };
        assert!(InferenceClient::from_endpoint(&cfg).is_err());
    }

    #[tokio::test]
    async fn decodes_json_body() {
        let url = serve_once(200, r#"[{"summary_text":"ok"}]"#).await;
        let client = InferenceClient::from_endpoint(&EndpointConfig::new(url))
            .unwrap()
            .unwrap();
        let value = client.post_json(&json!({"inputs": "x"})).await.unwrap();
        assert_eq!(value[0]["summary_text"], "ok");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = serve_once(503, r#"{"error":"loading"}"#).await;
        let client = InferenceClient::from_endpoint(&EndpointConfig::new(url))
            .unwrap()
            .unwrap();
        let err = client.post_json(&json!({})).await.unwrap_err();
        assert!(matches!(err, NlpError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_a_request_error() {
        let client = InferenceClient::from_endpoint(&EndpointConfig::new(closed_url().await))
            .unwrap()
            .unwrap();
        let err = client.post_json(&json!({})).await.unwrap_err();
        assert!(matches!(err, NlpError::Request(_)));
    }
}
