pub mod ingest_image;
pub mod manage_cars;
