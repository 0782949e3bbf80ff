use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// `configured` when a model credential is present, otherwise `unconfigured`.
    pub analysis: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let analysis = if state.analyzer.is_some() {
        "configured"
    } else {
        "unconfigured"
    };

    Json(HealthResponse {
        status: "OK".to_string(),
        analysis: analysis.to_string(),
    })
}
