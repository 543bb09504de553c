use super::form::read_image;
use crate::{
    domain::car::entity::ImageUrls,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State},
};

/// Standalone ingestion: accepts one file part named `image` (or `file`) and
/// returns the primary and thumbnail URLs.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageUrls>, AppError> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "image" | "file" => image = read_image(field).await?,
            _ => {}
        }
    }

    let payload = image.ok_or_else(|| AppError::BadRequest("Missing image".into()))?;
    let urls = state.ingestion.ingest(payload).await?;
    Ok(Json(urls))
}
