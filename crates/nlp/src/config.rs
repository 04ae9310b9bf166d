use serde::{Deserialize, Serialize};

/// Where a hosted inference model lives.
///
/// Leaving `api_url` unset disables the model; the adapter then always runs
/// its fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Inference endpoint accepting `{"inputs": ..., "parameters": {...}}`.
    pub api_url: Option<String>,
    /// Full `Authorization` header value (e.g. `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Overall request timeout in seconds.
    pub api_timeout_secs: u64,
}

impl EndpointConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_auth_header: None,
            api_timeout_secs: 30,
        }
    }
}

/// Summarization adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    #[serde(flatten)]
    pub endpoint: EndpointConfig,
    /// Lower length bound passed to the model.
    pub min_length: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            min_length: 50,
        }
    }
}

/// Named-entity adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    #[serde(flatten)]
    pub endpoint: EndpointConfig,
    /// Sub-token grouping mode requested from a token-classification model.
    pub aggregation_strategy: String,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            aggregation_strategy: "simple".into(),
        }
    }
}

/// Keyword extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Texts with fewer trimmed characters yield no keywords.
    pub min_chars: usize,
    /// Longest n-gram considered (1 = unigrams only).
    pub max_ngram: usize,
    /// Stop-word list language code (`"en"`, `"de"`, ...).
    pub stop_words_language: String,
    /// Additional words removed before n-grams are formed.
    pub extra_stop_words: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_chars: 50,
            max_ngram: 2,
            stop_words_language: "en".into(),
            extra_stop_words: Vec::new(),
        }
    }
}
