pub mod local_storage_service;
pub mod s3_storage_service;
pub mod traits;

use crate::config::{Config, Environment};
use local_storage_service::LocalStorageService;
use s3_storage_service::S3StorageService;
use std::sync::Arc;
use traits::StorageService;

/// Picks the image backend for the configured environment.
pub async fn storage_from_config(config: &Config) -> Arc<dyn StorageService> {
    match config.environment {
        Environment::Development => {
            tracing::info!(
                "Development mode, images are mocked under {}",
                config.local_image_base_url
            );
            Arc::new(LocalStorageService::new(config.local_image_base_url.clone()))
        }
        Environment::Production => Arc::new(S3StorageService::from_config(config).await),
    }
}
