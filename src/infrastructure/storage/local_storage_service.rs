use super::traits::StorageService;
use crate::domain::car::{entity::ImageUrls, errors::DomainError};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

/// Marker appended to the token for the thumbnail variant.
pub const THUMBNAIL_MARKER: &str = "_thumbnail";

/// Development backend. Fabricates URLs under a fixed local address and
/// discards the bytes.
#[derive(Debug, Clone)]
pub struct LocalStorageService {
    base_url: String,
}

impl LocalStorageService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        _content_type: &str,
    ) -> Result<ImageUrls, DomainError> {
        let token = Uuid::new_v4();
        debug!(
            "Mock upload of {} ({} bytes) as token {}",
            filename,
            data.len(),
            token
        );

        Ok(ImageUrls {
            image_url: format!("{}/{}.jpg", self.base_url, token),
            thumbnail_url: format!("{}/{}{}.jpg", self.base_url, token, THUMBNAIL_MARKER),
        })
    }

    fn backend(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }
}
