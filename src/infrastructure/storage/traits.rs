use crate::domain::car::{entity::ImageUrls, errors::DomainError};
use async_trait::async_trait;
use bytes::Bytes;

/// Backend that turns an accepted image into a primary/thumbnail URL pair.
///
/// One implementation is selected at startup; request handling never branches
/// on the deployment mode.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<ImageUrls, DomainError>;

    /// Short name reported by the health check.
    fn backend(&self) -> &'static str;

    /// Whether uploads can succeed at all with the current configuration.
    fn is_configured(&self) -> bool;
}
