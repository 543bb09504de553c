use super::{
    handlers::{cars, health, images},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Request body ceiling. Kept above the image limit so oversized images are
/// reported by ingestion rather than cut off mid-stream.
pub const MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;

/// CORS for the configured frontend origins, with credentials allowed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        // Health
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        // Cars CRUD
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route("/cars/with-image", post(cars::create_car_with_image))
        .route(
            "/cars/{id}",
            get(cars::get_car)
                .put(cars::replace_car)
                .delete(cars::delete_car),
        )
        // Images
        .route("/images", post(images::upload_image))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
