use super::traits::StorageService;
use crate::{
    config::Config,
    domain::car::{entity::ImageUrls, errors::DomainError},
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{Client, config::Credentials, primitives::ByteStream};
use bytes::Bytes;
use std::{path::Path, time::Duration};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Key namespace for uploaded car images.
pub const IMAGE_PREFIX: &str = "cars/";
/// Key namespace where thumbnails are expected to appear.
pub const THUMBNAIL_PREFIX: &str = "thumbnails/";
/// Extension used when the original filename carries none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Builds a fresh object key for `filename`, keeping its extension.
pub fn object_key(filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("{}{}.{}", IMAGE_PREFIX, Uuid::new_v4(), extension)
}

/// Public addressing of objects in the image and thumbnail buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Layout {
    pub bucket: String,
    pub thumbnail_bucket: String,
    pub region: String,
    /// Path-style endpoint for S3-compatible stores
    pub endpoint: Option<String>,
}

impl S3Layout {
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
            None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key),
        }
    }

    pub fn image_url(&self, key: &str) -> String {
        self.object_url(&self.bucket, key)
    }

    /// Derives the thumbnail address from a primary image address by swapping
    /// the bucket and key namespace. Nothing is uploaded there by this service.
    pub fn thumbnail_url(&self, image_url: &str) -> String {
        let image_root = self.object_url(&self.bucket, IMAGE_PREFIX);
        match image_url.strip_prefix(&image_root) {
            Some(rest) => self.object_url(
                &self.thumbnail_bucket,
                &format!("{}{}", THUMBNAIL_PREFIX, rest),
            ),
            None => image_url.replacen(IMAGE_PREFIX, THUMBNAIL_PREFIX, 1),
        }
    }
}

struct S3Target {
    client: Client,
    layout: S3Layout,
}

/// Production backend uploading car images to S3.
///
/// Without a configured bucket every upload fails with
/// [`DomainError::StoreUnavailable`].
pub struct S3StorageService {
    target: Option<S3Target>,
    upload_timeout: Duration,
}

impl S3StorageService {
    pub fn new(client: Client, layout: S3Layout, upload_timeout: Duration) -> Self {
        info!(
            "Initializing S3StorageService for bucket {} (thumbnails in {})",
            layout.bucket, layout.thumbnail_bucket
        );
        Self {
            target: Some(S3Target { client, layout }),
            upload_timeout,
        }
    }

    pub fn unconfigured(upload_timeout: Duration) -> Self {
        Self {
            target: None,
            upload_timeout,
        }
    }

    /// Builds the client from configuration. Explicit credentials take
    /// precedence over the default AWS provider chain.
    pub async fn from_config(config: &Config) -> Self {
        let Some(bucket) = config.s3_bucket_name.clone() else {
            warn!("S3_BUCKET_NAME is not set, image uploads will be rejected");
            return Self::unconfigured(config.upload_timeout());
        };

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()));
        if let (Some(key), Some(secret)) = (
            config.aws_access_key_id.clone(),
            config.aws_secret_access_key.clone(),
        ) {
            loader = loader.credentials_provider(Credentials::new(key, secret, None, None, "env"));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.s3_endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let layout = S3Layout {
            thumbnail_bucket: config
                .thumbnail_bucket()
                .unwrap_or(bucket.as_str())
                .to_string(),
            bucket,
            region: config.s3_region.clone(),
            endpoint: config.s3_endpoint.clone(),
        };

        Self::new(
            Client::from_conf(builder.build()),
            layout,
            config.upload_timeout(),
        )
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<ImageUrls, DomainError> {
        let target = self.target.as_ref().ok_or(DomainError::StoreUnavailable)?;
        let key = object_key(filename);

        debug!("Uploading {} to s3://{}/{}", filename, target.layout.bucket, key);

        let request = target
            .client
            .put_object()
            .bucket(&target.layout.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .cache_control("public, max-age=31536000, immutable")
            .send();

        match tokio::time::timeout(self.upload_timeout, request).await {
            Err(_) => {
                error!("Upload of {} timed out after {:?}", key, self.upload_timeout);
                return Err(DomainError::UploadFailed(anyhow::anyhow!(
                    "upload of {} timed out after {:?}",
                    key,
                    self.upload_timeout
                )));
            }
            Ok(Err(e)) => {
                error!("Upload of {} failed: {}", key, e);
                return Err(DomainError::UploadFailed(
                    anyhow::Error::new(e).context(format!("put_object {}", key)),
                ));
            }
            Ok(Ok(_)) => {}
        }

        let image_url = target.layout.image_url(&key);
        let thumbnail_url = target.layout.thumbnail_url(&image_url);
        info!("Stored {} as {}", filename, image_url);

        Ok(ImageUrls {
            image_url,
            thumbnail_url,
        })
    }

    fn backend(&self) -> &'static str {
        "s3"
    }

    fn is_configured(&self) -> bool {
        self.target.is_some()
    }
}
