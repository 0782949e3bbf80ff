pub mod dtos;
pub mod handlers;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    analysis::{CredibilityLabel, CredibilityResult, CredibilitySubscores},
    app_state::AppState,
    health::{self, HealthResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::analyze, health::health_check),
    components(schemas(
        dtos::AnalyzeRequest,
        dtos::ErrorResponse,
        CredibilityResult,
        CredibilityLabel,
        CredibilitySubscores,
        HealthResponse
    )),
    tags(
        (name = "analysis", description = "Article credibility analysis"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/healthz", get(health::health_check))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
