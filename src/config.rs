//! YAML configuration for the analysis pipeline.
//!
//! One file describes every stage: where each model lives, keyword
//! settings, the embedding backend, and an optional lexicon override.
//! Every section is optional; an empty document (`version: "1.0"`) runs all
//! stages on their fallback paths with the built-in lexicon.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! summarizer:
//!   api_url: "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn"
//!   api_timeout_secs: 30
//!   min_length: 50
//!
//! entities:
//!   api_url: "https://router.huggingface.co/hf-inference/models/dslim/bert-base-NER"
//!   aggregation_strategy: "simple"
//!
//! keywords:
//!   min_chars: 50
//!   max_ngram: 2
//!   stop_words_language: "en"
//!
//! embedding:
//!   mode: "onnx"
//!   model_path: "./models/all-MiniLM-L6-v2/model.onnx"
//!   tokenizer_path: "./models/all-MiniLM-L6-v2/tokenizer.json"
//!
//! lexicon:
//!   - name: "Cooking"
//!     triggers: ["recipe", "oven", "bake"]
//!   - name: "Travel"
//!     triggers: ["flight", "hotel", "passport"]
//! ```
//!
//! `HF_API_TOKEN`, when set, becomes the `Authorization` header of every
//! section that does not set `api_auth_header` itself.

use std::env;
use std::fs;
use std::path::Path;

use classify::{CategoryEntry, CategoryLexicon};
use nlp::{EndpointConfig, EntityConfig, KeywordConfig, SummarizerConfig};
use semantic::{EmbeddingConfig, EmbeddingMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding a hosted-inference API token.
pub const HF_TOKEN_ENV: &str = "HF_API_TOKEN";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TextlensConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub summarizer: SummarizerConfig,

    #[serde(default)]
    pub entities: EntityConfig,

    #[serde(default)]
    pub keywords: KeywordConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Replaces the built-in lexicon when present. Order matters.
    #[serde(default)]
    pub lexicon: Option<Vec<CategoryEntry>>,
}

impl TextlensConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TextlensConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Fills in auth headers from `HF_API_TOKEN` when it is set.
    pub fn apply_env(&mut self) {
        if let Ok(token) = env::var(HF_TOKEN_ENV) {
            self.apply_api_token(&token);
        }
    }

    /// Uses `Bearer <token>` for every section without its own header.
    pub fn apply_api_token(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        let header = format!("Bearer {token}");
        fill_header(&mut self.summarizer.endpoint, &header);
        fill_header(&mut self.entities.endpoint, &header);
        if self.embedding.api_auth_header.is_none() {
            self.embedding.api_auth_header = Some(header);
        }
    }

    /// The configured lexicon, or the built-in one.
    pub fn lexicon(&self) -> Result<CategoryLexicon, ConfigLoadError> {
        match &self.lexicon {
            Some(entries) => CategoryLexicon::new(entries.clone())
                .map_err(|e| ConfigLoadError::Validation(format!("lexicon: {e}"))),
            None => Ok(CategoryLexicon::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        validate_endpoint("summarizer", &self.summarizer.endpoint)?;
        validate_endpoint("entities", &self.entities.endpoint)?;

        if self.keywords.max_ngram == 0 {
            return Err(ConfigLoadError::Validation(
                "keywords.max_ngram must be >= 1".into(),
            ));
        }

        self.embedding
            .mode
            .parse::<EmbeddingMode>()
            .map_err(|e| ConfigLoadError::Validation(format!("embedding.mode: {e}")))?;
        if self.embedding.max_sequence_length == 0 {
            return Err(ConfigLoadError::Validation(
                "embedding.max_sequence_length must be >= 1".into(),
            ));
        }

        self.lexicon().map(|_| ())
    }
}

impl Default for TextlensConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            summarizer: SummarizerConfig::default(),
            entities: EntityConfig::default(),
            keywords: KeywordConfig::default(),
            embedding: EmbeddingConfig::default(),
            lexicon: None,
        }
    }
}

fn fill_header(endpoint: &mut EndpointConfig, header: &str) {
    if endpoint.api_auth_header.is_none() {
        endpoint.api_auth_header = Some(header.to_string());
    }
}

fn validate_endpoint(section: &str, endpoint: &EndpointConfig) -> Result<(), ConfigLoadError> {
    if endpoint.is_configured() && endpoint.api_timeout_secs == 0 {
        return Err(ConfigLoadError::Validation(format!(
            "{section}.api_timeout_secs must be >= 1"
        )));
    }
    Ok(())
}
