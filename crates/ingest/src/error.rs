//! Error types produced by the ingest crate.
//!
//! Every variant is a client mistake, so the HTTP layer maps all of them to
//! `400 Bad Request` and uses the `Display` text verbatim as the error body.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`MissingText`](IngestError::MissingText) | `text` absent or an empty string |
//! | [`InvalidParameter`](IngestError::InvalidParameter) | Numeric option out of range |
//!
//! ```rust
//! use ingest::IngestError;
//!
//! assert_eq!(IngestError::MissingText.to_string(), "Text is required");
//! ```
use thiserror::Error;

/// Errors raised while turning a raw request body into an [`AnalysisRequest`](crate::AnalysisRequest).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The required `text` field was missing or an empty string.
    ///
    /// Whitespace-only text is *not* rejected here; the analysis stages
    /// handle it through their own empty-input rules.
    #[error("Text is required")]
    MissingText,

    /// A numeric option was outside its accepted range.
    #[error("{field} must be at least {min}, got {value}")]
    InvalidParameter {
        field: &'static str,
        min: u64,
        value: u64,
    },
}
