use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use ingest::{require_text, RawAnalysisRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textlens::{AnalysisError, EMBEDDING_DIM};

#[derive(Debug, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimilarityRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub similarity: f32,
}

/// `POST /api/embed`: always 384 floats.
pub async fn embed(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<RawAnalysisRequest>,
) -> ServerResult<Json<EmbeddingResponse>> {
    let text = require_text(body.text.as_deref())?;
    let embedding = state.analyzer.generate_embedding(text).await.into_value();
    if embedding.len() != EMBEDDING_DIM {
        return Err(AnalysisError::InvalidEmbedding {
            got: embedding.len(),
            expected: EMBEDDING_DIM,
        }
        .into());
    }
    Ok(Json(EmbeddingResponse { embedding }))
}

/// `POST /api/similarity`: cosine similarity of the two texts' embeddings.
pub async fn similarity(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<SimilarityRequest>,
) -> ServerResult<Json<SimilarityResponse>> {
    let text = require_text(body.text.as_deref())?;
    let other = match body.other.as_deref() {
        Some(o) if !o.is_empty() => o,
        _ => return Err(ServerError::BadRequest("Other text is required".into())),
    };
    let similarity = state.analyzer.similarity(text, other).await;
    Ok(Json(SimilarityResponse { similarity }))
}
