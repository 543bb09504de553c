use crate::{
    application::ingest_image::{dto::ImagePayload, use_case::ImageIngestionService},
    domain::car::{
        entity::{Car, CarFields, NewCar},
        errors::DomainError,
        repository::CarRepository,
    },
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use validator::Validate;

/// Inventory operations over cars.
///
/// Fields are validated before anything is written. When an image accompanies
/// a new car it is ingested first, and the car row is only inserted once the
/// image URLs exist, so a failed image never leaves a car behind. An image
/// that was uploaded before the insert itself failed (for example on a VIN
/// collision) is not removed from the store.
#[derive(Clone)]
pub struct CarService {
    repository: Arc<dyn CarRepository>,
    ingestion: ImageIngestionService,
}

impl CarService {
    pub fn new(repository: Arc<dyn CarRepository>, ingestion: ImageIngestionService) -> Self {
        info!("Initializing CarService");
        Self {
            repository,
            ingestion,
        }
    }

    pub fn ingestion(&self) -> &ImageIngestionService {
        &self.ingestion
    }

    #[instrument(skip(self, details), fields(vin = %details.vin))]
    pub async fn create_car(&self, details: CarFields) -> Result<Car, DomainError> {
        details.validate()?;
        self.repository.create(&NewCar::without_image(details)).await
    }

    /// Creates a car, ingesting `image` first when one is supplied.
    ///
    /// # Errors
    /// Validation and ingestion errors are returned before any row is written;
    /// `DuplicateKey` comes from the insert itself.
    #[instrument(skip(self, details, image), fields(vin = %details.vin, has_image = image.is_some()))]
    pub async fn create_car_with_image(
        &self,
        details: CarFields,
        image: Option<ImagePayload>,
    ) -> Result<Car, DomainError> {
        details.validate()?;

        let new_car = match image {
            Some(payload) => {
                let urls = self.ingestion.ingest(payload).await.map_err(|e| {
                    error!("Image ingestion failed for VIN {}: {}", details.vin, e);
                    e
                })?;
                debug!("Image stored at {}", urls.image_url);
                NewCar::with_image(details, urls)
            }
            None => NewCar::without_image(details),
        };

        self.repository.create(&new_car).await
    }

    pub async fn get_car(&self, id: i32) -> Result<Car, DomainError> {
        self.repository.find_by_id(id).await
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>, DomainError> {
        self.repository.find_all().await
    }

    /// Replaces every business field of car `id`.
    #[instrument(skip(self, details), fields(vin = %details.vin))]
    pub async fn replace_car(&self, id: i32, details: CarFields) -> Result<Car, DomainError> {
        details.validate()?;
        self.repository.replace(id, &details).await
    }

    #[instrument(skip(self))]
    pub async fn delete_car(&self, id: i32) -> Result<(), DomainError> {
        self.repository.delete(id).await
    }
}
