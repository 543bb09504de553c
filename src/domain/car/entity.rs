use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// A vehicle held in the dealership inventory.
///
/// # Invariants
/// - `id` is assigned by storage at creation and never changes
/// - `vin` is unique across the whole inventory
/// - `image_url` and `thumbnail_url` are either both set or both absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Car {
    /// Storage-assigned identifier
    pub id: i32,

    pub make: String,

    pub model: String,

    /// Model year
    pub year: i32,

    /// Asking price in the dealership's currency
    pub price: f64,

    /// Vehicle Identification Number, treated as an opaque business key
    pub vin: String,

    pub color: String,

    /// Address of the full-size image, when one was supplied at creation
    pub image_url: Option<String>,

    /// Address where the thumbnail rendition is expected to appear.
    /// Not guaranteed to resolve immediately after creation.
    pub thumbnail_url: Option<String>,
}

impl Car {
    /// Builds the stored representation of `car` under the given identifier.
    pub fn new(id: i32, car: NewCar) -> Self {
        let NewCar { fields, images } = car;
        let (image_url, thumbnail_url) = match images {
            Some(urls) => (Some(urls.image_url), Some(urls.thumbnail_url)),
            None => (None, None),
        };

        Self {
            id,
            make: fields.make,
            model: fields.model,
            year: fields.year,
            price: fields.price,
            vin: fields.vin,
            color: fields.color,
            image_url,
            thumbnail_url,
        }
    }

    /// Returns the business fields of this car.
    pub fn fields(&self) -> CarFields {
        CarFields {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            price: self.price,
            vin: self.vin.clone(),
            color: self.color.clone(),
        }
    }

    /// Returns the image URL pair, if both halves are present.
    pub fn image_urls(&self) -> Option<ImageUrls> {
        match (&self.image_url, &self.thumbnail_url) {
            (Some(image_url), Some(thumbnail_url)) => Some(ImageUrls {
                image_url: image_url.clone(),
                thumbnail_url: thumbnail_url.clone(),
            }),
            _ => None,
        }
    }

    /// Overwrites every business field with `fields`. The identifier and the
    /// image URL pair are kept.
    pub fn replace_fields(&mut self, fields: CarFields) {
        self.make = fields.make;
        self.model = fields.model;
        self.year = fields.year;
        self.price = fields.price;
        self.vin = fields.vin;
        self.color = fields.color;
    }
}

/// The caller-supplied fields of a car.
///
/// Used both to create a car and as the full replacement payload for an
/// existing one; there is no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
#[validate(schema(function = "validate_finite_price"))]
pub struct CarFields {
    #[validate(length(min = 1, message = "make must not be empty"))]
    pub make: String,

    #[validate(length(min = 1, message = "model must not be empty"))]
    pub model: String,

    #[validate(range(min = 1886, max = 2100, message = "year is out of range"))]
    pub year: i32,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    #[validate(length(min = 1, message = "vin must not be empty"))]
    pub vin: String,

    #[validate(length(min = 1, message = "color must not be empty"))]
    pub color: String,
}

/// NaN and infinities slip past the range check and serialize as `null`.
fn validate_finite_price(fields: &CarFields) -> Result<(), ValidationError> {
    if fields.price.is_finite() {
        return Ok(());
    }
    let mut err = ValidationError::new("price");
    err.message = Some("price must be a finite number".into());
    Err(err)
}

/// Primary image address together with its derived thumbnail address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageUrls {
    pub image_url: String,
    pub thumbnail_url: String,
}

/// Insert payload: the business fields plus the optional image pair.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub fields: CarFields,
    pub images: Option<ImageUrls>,
}

impl NewCar {
    pub fn without_image(fields: CarFields) -> Self {
        Self {
            fields,
            images: None,
        }
    }

    pub fn with_image(fields: CarFields, images: ImageUrls) -> Self {
        Self {
            fields,
            images: Some(images),
        }
    }
}
