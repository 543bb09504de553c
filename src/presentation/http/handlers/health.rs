use crate::presentation::http::state::AppState;
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    environment: &'static str,
    storage_backend: &'static str,
    storage_configured: bool,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<impl Serialize> {
    let storage = state.ingestion.storage();
    Json(HealthResponse {
        status: "healthy",
        environment: state.config.environment.as_str(),
        storage_backend: storage.backend(),
        storage_configured: storage.is_configured(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
