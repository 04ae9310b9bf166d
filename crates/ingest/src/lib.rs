//! textlens intake layer
//!
//! This is where request bodies enter textlens. We check the one hard
//! requirement every endpoint shares (a non-empty `text`), apply option
//! defaults, and hand a typed [`AnalysisRequest`] to the analysis stages.
//!
//! The crate also carries the two pieces every stage needs:
//!
//! - [`Outcome`] / [`FallbackReason`], the result type adapters return so a
//!   degraded answer is visible in the type rather than swallowed
//! - character-boundary helpers ([`truncate_chars`] and friends), since all
//!   input limits are counted in characters
//!
//! ## Example
//!
//! ```
//! use ingest::{validate, IngestError, RawAnalysisRequest};
//!
//! let ok = validate(RawAnalysisRequest::with_text("Rust is fun")).unwrap();
//! assert_eq!(ok.top_n, 5);
//!
//! let err = validate(RawAnalysisRequest::default()).unwrap_err();
//! assert_eq!(err, IngestError::MissingText);
//! ```
use tracing::{debug, warn};

mod error;
mod outcome;
mod text;
mod types;

pub use crate::error::IngestError;
pub use crate::outcome::{FallbackReason, Outcome};
pub use crate::text::{is_blank, trimmed_char_count, truncate_chars};
pub use crate::types::{AnalysisRequest, RawAnalysisRequest, DEFAULT_MAX_LENGTH, DEFAULT_TOP_N};

/// Returns the text when present and non-empty.
///
/// Only absence and the empty string are rejected. Whitespace-only text is
/// accepted and handled downstream by each stage's empty-input rule.
pub fn require_text(text: Option<&str>) -> Result<&str, IngestError> {
    match text {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(IngestError::MissingText),
    }
}

/// Validates a raw body and applies defaults.
pub fn validate(raw: RawAnalysisRequest) -> Result<AnalysisRequest, IngestError> {
    match validate_inner(raw) {
        Ok(req) => {
            debug!(
                text_chars = req.text.chars().count(),
                url = ?req.url,
                max_length = req.max_length,
                top_n = req.top_n,
                "ingest_success"
            );
            Ok(req)
        }
        Err(err) => {
            warn!(error = %err, "ingest_failure");
            Err(err)
        }
    }
}

fn validate_inner(raw: RawAnalysisRequest) -> Result<AnalysisRequest, IngestError> {
    let RawAnalysisRequest {
        text,
        url,
        max_length,
        top_n,
    } = raw;

    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Err(IngestError::MissingText),
    };

    let max_length = match max_length {
        Some(0) => {
            return Err(IngestError::InvalidParameter {
                field: "max_length",
                min: 1,
                value: 0,
            })
        }
        Some(n) => n as usize,
        None => DEFAULT_MAX_LENGTH,
    };

    Ok(AnalysisRequest {
        text,
        url: url.filter(|u| !u.is_empty()),
        max_length,
        top_n: top_n.map_or(DEFAULT_TOP_N, |n| n as usize),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_rejected() {
        assert_eq!(
            validate(RawAnalysisRequest::default()),
            Err(IngestError::MissingText)
        );
    }

    #[test]
    fn empty_text_rejected() {
        assert_eq!(
            validate(RawAnalysisRequest::with_text("")),
            Err(IngestError::MissingText)
        );
    }

    #[test]
    fn whitespace_text_passes_validation() {
        let req = validate(RawAnalysisRequest::with_text("   ")).unwrap();
        assert_eq!(req.text, "   ");
    }

    #[test]
    fn single_char_text_passes_validation() {
        let req = validate(RawAnalysisRequest::with_text("a")).unwrap();
        assert_eq!(req.text, "a");
        assert_eq!(req.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(req.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn options_override_defaults() {
        let raw = RawAnalysisRequest {
            text: Some("body".into()),
            url: Some("https://example.com/a".into()),
            max_length: Some(60),
            top_n: Some(0),
        };
        let req = validate(raw).unwrap();
        assert_eq!(req.max_length, 60);
        assert_eq!(req.top_n, 0);
        assert_eq!(req.url.as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn zero_max_length_rejected() {
        let raw = RawAnalysisRequest {
            max_length: Some(0),
            ..RawAnalysisRequest::with_text("body")
        };
        assert!(matches!(
            validate(raw),
            Err(IngestError::InvalidParameter {
                field: "max_length",
                ..
            })
        ));
    }

    #[test]
    fn empty_url_dropped() {
        let raw = RawAnalysisRequest {
            url: Some(String::new()),
            ..RawAnalysisRequest::with_text("body")
        };
        assert_eq!(validate(raw).unwrap().url, None);
    }

    #[test]
    fn require_text_matches_validate() {
        assert_eq!(require_text(Some("x")), Ok("x"));
        assert_eq!(require_text(Some("")), Err(IngestError::MissingText));
        assert_eq!(require_text(None), Err(IngestError::MissingText));
    }
}
