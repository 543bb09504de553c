use crate::{
    application::ingest_image::dto::ImagePayload,
    domain::car::entity::CarFields,
    presentation::http::errors::AppError,
};
use axum::extract::multipart::Field;

/// Reads a file part. An empty part without a filename, as browsers send for
/// an untouched file input, counts as no file.
pub async fn read_image(field: Field<'_>) -> Result<Option<ImagePayload>, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let data = field.bytes().await?;

    if filename.is_empty() && data.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImagePayload::new(data, filename, content_type)))
}

/// Car fields collected from multipart text parts.
#[derive(Debug, Default)]
pub struct CarForm {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub price: Option<String>,
    pub vin: Option<String>,
    pub color: Option<String>,
}

impl CarForm {
    /// Records a text part. Returns false for names that are not car fields.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "make" => &mut self.make,
            "model" => &mut self.model,
            "year" => &mut self.year,
            "price" => &mut self.price,
            "vin" => &mut self.vin,
            "color" => &mut self.color,
            _ => return false,
        };
        *slot = Some(value.trim().to_string());
        true
    }

    pub fn into_fields(self) -> Result<CarFields, AppError> {
        fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
            value.ok_or_else(|| AppError::BadRequest(format!("Missing field: {}", name)))
        }

        let year = required(self.year, "year")?;
        let price = required(self.price, "price")?;

        Ok(CarFields {
            make: required(self.make, "make")?,
            model: required(self.model, "model")?,
            year: year
                .parse()
                .map_err(|_| AppError::BadRequest(format!("year must be an integer, got {:?}", year)))?,
            price: price
                .parse()
                .map_err(|_| AppError::BadRequest(format!("price must be a number, got {:?}", price)))?,
            vin: required(self.vin, "vin")?,
            color: required(self.color, "color")?,
        })
    }
}
