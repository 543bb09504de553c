use crate::{
    application::ingest_image::dto::ImagePayload,
    domain::car::{entity::ImageUrls, errors::DomainError},
    infrastructure::storage::traits::StorageService,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Largest accepted image, inclusive.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Content types must start with this to count as images.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Checks the declared content type and the size of an inbound image.
///
/// Only the declared type is inspected, never the bytes themselves. The type is
/// checked first, so a non-image is rejected as such whatever its size.
pub fn validate_image(payload: &ImagePayload) -> Result<(), DomainError> {
    let content_type = payload.content_type.trim().to_ascii_lowercase();
    if !content_type.starts_with(IMAGE_CONTENT_TYPE_PREFIX) {
        return Err(DomainError::InvalidContentType(payload.content_type.clone()));
    }

    if payload.data.len() > MAX_IMAGE_BYTES {
        return Err(DomainError::TooLarge {
            size: payload.data.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }

    Ok(())
}

/// Validates images and hands accepted ones to the configured storage backend.
///
/// Holds no state of its own. Failures are returned to the caller as they
/// occur; nothing is retried.
#[derive(Clone)]
pub struct ImageIngestionService {
    storage: Arc<dyn StorageService>,
}

impl ImageIngestionService {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        info!(
            "Initializing ImageIngestionService with {} backend",
            storage.backend()
        );
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn StorageService> {
        &self.storage
    }

    /// Validates `payload` and stores it, returning the primary and thumbnail
    /// URLs.
    ///
    /// # Errors
    /// - `InvalidContentType` when the declared type is not an image
    /// - `TooLarge` when the payload exceeds [`MAX_IMAGE_BYTES`]
    /// - `StoreUnavailable` / `UploadFailed` from the storage backend
    #[instrument(skip(self, payload), fields(
        filename = %payload.filename,
        content_type = %payload.content_type,
        size = payload.data.len()
    ))]
    pub async fn ingest(&self, payload: ImagePayload) -> Result<ImageUrls, DomainError> {
        if let Err(e) = validate_image(&payload) {
            warn!("Rejected image {}: {}", payload.filename, e);
            return Err(e);
        }

        let urls = self
            .storage
            .upload(payload.data, &payload.filename, &payload.content_type)
            .await?;

        info!("Ingested image {} as {}", payload.filename, urls.image_url);
        Ok(urls)
    }
}
