//! textlens Server - HTTP REST API for text analysis
//!
//! Exposes the [`textlens::Analyzer`] stages as JSON endpoints. Every
//! error, including malformed bodies, panics and unknown routes, is
//! answered as `{"error": "<message>"}`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with per-stage model status
//! - `GET /api/categories` - Classifier labels
//! - `POST /api/analyze` - Summary, category, entities, keywords, embedding
//! - `POST /api/summarize` - Summary (`max_length`, default 150)
//! - `POST /api/classify` - Category
//! - `POST /api/entities` - Named entities grouped by label
//! - `POST /api/keywords` - Keywords (`top_n`, default 5)
//! - `POST /api/embed` - 384-float embedding
//! - `POST /api/similarity` - Cosine similarity of `text` and `other`
//!
//! # Configuration
//!
//! `PORT` (default 5000) and `DEBUG` (`True` for pretty debug logs), plus
//! `TEXTLENS__*` variables and an optional `server.{toml,yaml,json}`.
//! `TEXTLENS__PIPELINE_CONFIG` points at the models/lexicon YAML.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use server::{build_router, init_tracing, start_server};
pub use state::ServerState;
