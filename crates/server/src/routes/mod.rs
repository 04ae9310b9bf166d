//! API route handlers
//!
//! - `health`: liveness and readiness
//! - `analyze`: combined analysis, summary, category
//! - `extraction`: named entities and keywords
//! - `embedding`: vectors and similarity

pub mod analyze;
pub mod embedding;
pub mod extraction;
pub mod health;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service name reported by the probes.
pub const SERVICE_NAME: &str = "ml-service";

/// API version and base info
///
/// ```json
/// {
///   "name": "textlens",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "textlens",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/ready",
            "/api/analyze",
            "/api/summarize",
            "/api/classify",
            "/api/categories",
            "/api/entities",
            "/api/keywords",
            "/api/embed",
            "/api/similarity"
        ]
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// 405 handler for known paths hit with the wrong method
pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
