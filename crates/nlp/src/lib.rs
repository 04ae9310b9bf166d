//! textlens language adapters.
//!
//! Three stages that turn raw text into structured signals:
//!
//! - [`Summarizer`]: abstractive summary from a hosted model, with an
//!   extractive first-three-sentences fallback
//! - [`EntityExtractor`]: named entities grouped by label
//! - [`KeywordExtractor`]: local TF-IDF over unigrams and bigrams
//!
//! Model-backed stages talk to an inference endpoint over HTTP and never
//! fail outward. They return an [`ingest::Outcome`] that says whether the
//! value came from the model or from the fallback.
//!
//! ```
//! use nlp::KeywordExtractor;
//!
//! let extractor = KeywordExtractor::default();
//! let text = "Rust ownership rules make memory bugs rare. Ownership is checked at compile time.";
//! let keywords = extractor.extract(text, 1).into_value();
//! assert_eq!(keywords, vec!["ownership"]);
//! ```

mod client;
mod config;
mod entities;
mod error;
mod keywords;
mod sentences;
mod stopwords;
mod summarize;

pub use crate::config::{EndpointConfig, EntityConfig, KeywordConfig, SummarizerConfig};
pub use crate::entities::{
    group_entities, EntityExtractor, EntitySpan, EntityMap, MAX_ENTITY_INPUT_CHARS,
};
pub use crate::error::NlpError;
pub use crate::keywords::{KeywordExtractor, ScoredTerm};
pub use crate::sentences::{leading_sentences, split_sentences};
pub use crate::stopwords::StopwordFilter;
pub use crate::summarize::{
    fallback_summary, Summarizer, ECHO_CHARS, FALLBACK_SENTENCES, MAX_MODEL_INPUT_CHARS,
    SHORT_TEXT_CHARS,
};
