use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;

use crate::{
    analysis::{AnalysisRequest, CredibilityResult},
    api::dtos::{AnalyzeRequest, ErrorResponse, INVALID_BODY},
    app_state::AppState,
    error::AnalysisError,
};

#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Credibility assessment", body = CredibilityResult),
        (status = 400, description = "Missing, ambiguous or invalid input", body = ErrorResponse),
        (status = 502, description = "Extraction or model failure", body = ErrorResponse),
        (status = 503, description = "No model credential configured", body = ErrorResponse)
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<CredibilityResult>, AnalysisError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected request body");
        AnalysisError::InvalidInput(INVALID_BODY.to_string())
    })?;

    let request = AnalysisRequest::try_from(body).map_err(AnalysisError::InvalidInput)?;

    let analyzer = state
        .analyzer
        .as_ref()
        .ok_or(AnalysisError::ServiceUnavailable)?;

    analyzer.analyze(request).await.map(Json)
}
