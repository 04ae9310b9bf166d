use thiserror::Error;

/// Failures inside the language adapters.
///
/// These never reach HTTP callers directly: adapters convert them into a
/// [`FallbackReason`](ingest::FallbackReason). Only construction errors
/// (`InvalidConfig`, `Client`) surface, at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NlpError {
    #[error("invalid nlp config: {0}")]
    InvalidConfig(String),
    #[error("http client setup failed: {0}")]
    Client(String),
    #[error("HTTP request failed: {0}")]
    Request(String),
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Response(String),
}
