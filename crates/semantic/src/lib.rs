//! textlens sentence embeddings
//!
//! Turns text into 384-dimensional unit vectors for similarity search, and
//! compares them with [`compute_similarity`].
//!
//! Three backends, picked by [`EmbeddingConfig::mode`]:
//!
//! - **off**: every call returns the zero vector
//! - **onnx**: a local sentence-transformers model (needs the `onnx` cargo
//!   feature plus `model.onnx` and `tokenizer.json` on disk)
//! - **api**: a remote feature-extraction endpoint over HTTP
//!
//! Embedding never fails at call time. A missing model, a failed request or
//! a malformed response produces the zero vector, and the returned
//! [`ingest::Outcome`] says which of those happened.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{compute_similarity, Embedder, EMBEDDING_DIM};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let embedder = Embedder::disabled();
//! let v = rt.block_on(embedder.generate_embedding("hello")).into_value();
//! assert_eq!(v.len(), EMBEDDING_DIM);
//! assert_eq!(compute_similarity(&v, &v), 0.0);
//! ```

mod api;
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
mod assets;
mod config;
mod embedder;
mod error;
mod normalize;
#[cfg(feature = "onnx")]
mod onnx;
mod types;

pub use crate::config::EmbeddingConfig;
pub use crate::embedder::{Embedder, MAX_EMBEDDING_INPUT_CHARS};
pub use crate::error::SemanticError;
pub use crate::normalize::compute_similarity;
pub use crate::types::{zero_embedding, EmbeddingMode, EMBEDDING_DIM};
