//! Result type shared by every analysis adapter.
//!
//! Adapters never fail outward: when a model is missing, errors out, or the
//! input is too small to be worth a model call, they substitute a fixed
//! fallback value. [`Outcome`] keeps that substitution visible to callers
//! instead of hiding it behind a catch-all.
use std::fmt;

use serde::Serialize;

/// Value produced by an adapter, tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The adapter ran its primary path (model call or local algorithm).
    Computed(T),
    /// The adapter substituted its deterministic fallback value.
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Outcome::Fallback { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Computed(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Computed(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Outcome::Computed(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Transforms the carried value, keeping the fallback tag intact.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Computed(value) => Outcome::Computed(f(value)),
            Outcome::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

/// Why an adapter used its fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Input was empty or whitespace only.
    EmptyInput,
    /// Input was shorter than the adapter's minimum (in characters, trimmed).
    ShortInput { chars: usize, threshold: usize },
    /// No model is configured for this adapter.
    ModelUnavailable,
    /// The model call failed.
    ModelFailed { message: String },
    /// The model answered, but with something unusable.
    InvalidOutput { message: String },
}

impl FallbackReason {
    pub fn model_failed(message: impl Into<String>) -> Self {
        FallbackReason::ModelFailed {
            message: message.into(),
        }
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        FallbackReason::InvalidOutput {
            message: message.into(),
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::EmptyInput => write!(f, "empty input"),
            FallbackReason::ShortInput { chars, threshold } => {
                write!(f, "input has {chars} chars, below threshold {threshold}")
            }
            FallbackReason::ModelUnavailable => write!(f, "model unavailable"),
            FallbackReason::ModelFailed { message } => write!(f, "model failed: {message}"),
            FallbackReason::InvalidOutput { message } => {
                write!(f, "invalid model output: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_has_no_reason() {
        let outcome = Outcome::Computed(3);
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.reason(), None);
        assert_eq!(*outcome.value(), 3);
    }

    #[test]
    fn fallback_keeps_reason_through_map() {
        let outcome = Outcome::fallback(vec![1, 2], FallbackReason::ModelUnavailable);
        let mapped = outcome.map(|v| v.len());
        assert!(mapped.is_fallback());
        assert_eq!(mapped.reason(), Some(&FallbackReason::ModelUnavailable));
        assert_eq!(mapped.into_value(), 2);
    }

    #[test]
    fn reason_display() {
        let reason = FallbackReason::ShortInput {
            chars: 12,
            threshold: 50,
        };
        assert_eq!(reason.to_string(), "input has 12 chars, below threshold 50");
        assert_eq!(
            FallbackReason::model_failed("timeout").to_string(),
            "model failed: timeout"
        );
    }

    #[test]
    fn reason_serializes_with_kind_tag() {
        let json = serde_json::to_value(FallbackReason::invalid_output("empty")).unwrap();
        assert_eq!(json["kind"], "invalid_output");
        assert_eq!(json["message"], "empty");
    }
}
