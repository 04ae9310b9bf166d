//! Request shapes accepted by the analysis endpoints.
//!
//! ```text
//! RawAnalysisRequest            (JSON body, every field optional)
//! ├── text: Option<String>
//! ├── url: Option<String>
//! ├── max_length: Option<u32>
//! └── top_n: Option<u32>
//!
//!         ↓ ingest::validate()
//!
//! AnalysisRequest               (defaults applied, text guaranteed non-empty)
//! ├── text: String
//! ├── url: Option<String>
//! ├── max_length: usize   (default 150)
//! └── top_n: usize        (default 5)
//! ```
use serde::{Deserialize, Serialize};

/// Default upper bound handed to the summarizer.
pub const DEFAULT_MAX_LENGTH: usize = 150;

/// Default number of keywords returned.
pub const DEFAULT_TOP_N: usize = 5;

/// Request body as received. Every field is optional so that a missing
/// `text` can be reported with the fixed validation message instead of a
/// deserializer error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Where the text came from. Informational only; it is logged and never fetched.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub top_n: Option<u32>,
}

impl RawAnalysisRequest {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Validated request, ready for the analysis stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    pub url: Option<String>,
    pub max_length: usize,
    pub top_n: usize,
}

impl AnalysisRequest {
    /// Builds a request with default options. The caller is responsible
    /// for `text` being non-empty; use [`validate`](crate::validate) for
    /// untrusted input.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            max_length: DEFAULT_MAX_LENGTH,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}
