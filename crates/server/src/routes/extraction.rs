use crate::error::ServerResult;
use crate::extract::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use ingest::{require_text, validate, RawAnalysisRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textlens::EntityMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct EntitiesResponse {
    pub entities: EntityMap,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

/// `POST /api/entities`
pub async fn entities(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<RawAnalysisRequest>,
) -> ServerResult<Json<EntitiesResponse>> {
    let text = require_text(body.text.as_deref())?;
    let entities = state.analyzer.extract_entities(text).await.into_value();
    Ok(Json(EntitiesResponse { entities }))
}

/// `POST /api/keywords`
pub async fn keywords(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<RawAnalysisRequest>,
) -> ServerResult<Json<KeywordsResponse>> {
    let request = validate(body)?;
    let keywords = state
        .analyzer
        .extract_keywords(&request.text, request.top_n)
        .into_value();
    Ok(Json(KeywordsResponse { keywords }))
}
