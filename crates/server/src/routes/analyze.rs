use crate::error::ServerResult;
use crate::extract::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use ingest::{require_text, validate, RawAnalysisRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textlens::AnalysisResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// `POST /api/analyze`: all five stages in one response.
pub async fn analyze(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<RawAnalysisRequest>,
) -> ServerResult<Json<AnalysisResult>> {
    let request = validate(body)?;
    let result = state.analyzer.analyze(&request).await?;
    Ok(Json(result))
}

/// `POST /api/summarize`
pub async fn summarize(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<RawAnalysisRequest>,
) -> ServerResult<Json<SummaryResponse>> {
    let request = validate(body)?;
    let summary = state
        .analyzer
        .summarize(&request.text, request.max_length)
        .await
        .into_value();
    Ok(Json(SummaryResponse { summary }))
}

/// `POST /api/classify`
pub async fn classify(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<RawAnalysisRequest>,
) -> ServerResult<Json<CategoryResponse>> {
    let text = require_text(body.text.as_deref())?;
    Ok(Json(CategoryResponse {
        category: state.analyzer.classify(text).to_string(),
    }))
}

/// `GET /api/categories`: lexicon labels in tie-break order, then "Other".
pub async fn categories(State(state): State<Arc<ServerState>>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: state
            .analyzer
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}
