use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Car {0} not found")]
    NotFound(i32),
    #[error("A car with VIN {0} already exists")]
    DuplicateKey(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Content type {0:?} is not an image")]
    InvalidContentType(String),
    #[error("Image is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("Object store is not configured")]
    StoreUnavailable,
    #[error("Upload failed: {0}")]
    UploadFailed(#[source] anyhow::Error),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
