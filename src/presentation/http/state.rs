use crate::{
    application::{ingest_image::use_case::ImageIngestionService, manage_cars::use_case::CarService},
    config::Config,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
    pub ingestion: Arc<ImageIngestionService>,
    pub config: Config,
}

impl AppState {
    /// Wires both services around one ingestion pipeline.
    pub fn new(car_service: CarService, config: Config) -> Self {
        let ingestion = Arc::new(car_service.ingestion().clone());
        Self {
            car_service: Arc::new(car_service),
            ingestion,
            config,
        }
    }
}
