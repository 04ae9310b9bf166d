//! Workspace umbrella crate for textlens.
//!
//! [`Analyzer`] bundles every analysis stage behind one value that is built
//! once at startup and shared read-only:
//!
//! | Stage | Crate | Backing |
//! |---|---|---|
//! | summary | `nlp` | hosted model, first-three-sentences fallback |
//! | category | `classify` | keyword lexicon, pure |
//! | entities | `nlp` | hosted model, `{}` fallback |
//! | keywords | `nlp` | local TF-IDF |
//! | embedding | `semantic` | ONNX or hosted model, zero-vector fallback |
//!
//! No stage fails at call time. Each one returns an [`Outcome`] that tells
//! whether the value came from the model or from the fallback path.
//!
//! ```
//! use textlens::{AnalysisRequest, Analyzer};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let analyzer = Analyzer::offline();
//! let request = AnalysisRequest::new("I love this software tutorial on python programming");
//! let result = rt.block_on(analyzer.analyze(&request)).unwrap();
//! assert_eq!(result.category, "Technology");
//! assert_eq!(result.embedding.len(), 384);
//! ```

pub mod config;

pub use classify::{CategoryEntry, CategoryLexicon, LexiconError, OTHER};
pub use config::{ConfigLoadError, TextlensConfig, HF_TOKEN_ENV};
pub use ingest::{
    validate, AnalysisRequest, FallbackReason, IngestError, Outcome, RawAnalysisRequest,
};
pub use nlp::{EntityMap, NlpError};
pub use semantic::{compute_similarity, SemanticError, EMBEDDING_DIM};

use std::time::Instant;

use nlp::{EntityExtractor, KeywordExtractor, Summarizer};
use semantic::Embedder;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while building an [`Analyzer`] or assembling a result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("language adapter setup failed: {0}")]
    Nlp(#[from] NlpError),
    #[error("embedding backend setup failed: {0}")]
    Semantic(#[from] SemanticError),
    #[error("embedding has {got} dimensions, expected {expected}")]
    InvalidEmbedding { got: usize, expected: usize },
}

/// Combined output of all five stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub category: String,
    pub entities: EntityMap,
    pub keywords: Vec<String>,
    pub embedding: Vec<f32>,
}

/// Whether each model-backed stage has a model behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    pub summarizer: &'static str,
    pub entities: &'static str,
    pub embedding: &'static str,
}

fn status(model_backed: bool) -> &'static str {
    if model_backed {
        "model"
    } else {
        "fallback"
    }
}

/// All analysis stages, ready to serve.
#[derive(Debug)]
pub struct Analyzer {
    lexicon: CategoryLexicon,
    summarizer: Summarizer,
    entities: EntityExtractor,
    keywords: KeywordExtractor,
    embedder: Embedder,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::offline()
    }
}

impl Analyzer {
    /// Builds every stage from `config`.
    pub fn from_config(config: &TextlensConfig) -> Result<Self, AnalysisError> {
        let analyzer = Self {
            lexicon: config.lexicon()?,
            summarizer: Summarizer::new(config.summarizer.clone())?,
            entities: EntityExtractor::new(config.entities.clone())?,
            keywords: KeywordExtractor::new(config.keywords.clone())?,
            embedder: Embedder::new(&config.embedding)?,
        };
        let components = analyzer.component_status();
        info!(
            summarizer = components.summarizer,
            entities = components.entities,
            embedding = components.embedding,
            embedding_backend = analyzer.embedder.backend_name(),
            categories = analyzer.lexicon.len(),
            "analyzer_ready"
        );
        Ok(analyzer)
    }

    /// No models: every model-backed stage runs its fallback.
    pub fn offline() -> Self {
        Self {
            lexicon: CategoryLexicon::default(),
            summarizer: Summarizer::offline(),
            entities: EntityExtractor::offline(),
            keywords: KeywordExtractor::default(),
            embedder: Embedder::disabled(),
        }
    }

    /// Replaces the lexicon.
    pub fn with_lexicon(mut self, lexicon: CategoryLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn lexicon(&self) -> &CategoryLexicon {
        &self.lexicon
    }

    pub async fn summarize(&self, text: &str, max_length: usize) -> Outcome<String> {
        log_fallback("summarizer", self.summarizer.summarize(text, max_length).await)
    }

    pub fn classify(&self, text: &str) -> &str {
        classify::classify(text, &self.lexicon)
    }

    /// Category names in tie-break order, followed by `"Other"`.
    pub fn categories(&self) -> Vec<&str> {
        self.lexicon.categories()
    }

    pub async fn extract_entities(&self, text: &str) -> Outcome<EntityMap> {
        log_fallback("entities", self.entities.extract(text).await)
    }

    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Outcome<Vec<String>> {
        self.keywords.extract(text, top_n)
    }

    pub async fn generate_embedding(&self, text: &str) -> Outcome<Vec<f32>> {
        log_fallback("embedding", self.embedder.generate_embedding(text).await)
    }

    /// Cosine similarity between the embeddings of two texts.
    pub async fn similarity(&self, a: &str, b: &str) -> f32 {
        let (ea, eb) = tokio::join!(self.generate_embedding(a), self.generate_embedding(b));
        compute_similarity(ea.value(), eb.value())
    }

    /// Runs all five stages on one request.
    ///
    /// The three model-backed stages run concurrently. Fails only if the
    /// embedding breaks its fixed-width guarantee.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let text = request.text.as_str();

        let (summary, entities, embedding) = tokio::join!(
            self.summarize(text, request.max_length),
            self.extract_entities(text),
            self.generate_embedding(text),
        );
        let category = self.classify(text).to_string();
        let keywords = self.extract_keywords(text, request.top_n);

        let fallbacks = [
            summary.is_fallback(),
            entities.is_fallback(),
            embedding.is_fallback(),
        ]
        .iter()
        .filter(|f| **f)
        .count();

        let embedding = embedding.into_value();
        if embedding.len() != EMBEDDING_DIM {
            return Err(AnalysisError::InvalidEmbedding {
                got: embedding.len(),
                expected: EMBEDDING_DIM,
            });
        }

        info!(
            url = request.url.as_deref().unwrap_or(""),
            text_chars = text.chars().count(),
            category = %category,
            fallbacks,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis_complete"
        );

        Ok(AnalysisResult {
            summary: summary.into_value(),
            category,
            entities: entities.into_value(),
            keywords: keywords.into_value(),
            embedding,
        })
    }

    pub fn component_status(&self) -> ComponentStatus {
        ComponentStatus {
            summarizer: status(self.summarizer.is_model_backed()),
            entities: status(self.entities.is_model_backed()),
            embedding: status(self.embedder.is_model_backed()),
        }
    }
}

/// Logs model failures at `warn`. Expected fallbacks (short input, no
/// model configured) are not logged.
fn log_fallback<T>(stage: &'static str, outcome: Outcome<T>) -> Outcome<T> {
    if let Some(reason @ (FallbackReason::ModelFailed { .. } | FallbackReason::InvalidOutput { .. })) =
        outcome.reason()
    {
        warn!(stage, reason = %reason, "stage_fallback");
    }
    outcome
}
