use dealership_api::domain::car::entity::{Car, CarFields, ImageUrls, NewCar};
use validator::Validate;

fn corolla() -> CarFields {
    CarFields {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 2022,
        price: 21000.0,
        vin: "1HGCM82633A004352".to_string(),
        color: "blue".to_string(),
    }
}

#[test]
fn valid_fields_pass_validation() {
    assert!(corolla().validate().is_ok());
}

#[test]
fn blank_text_fields_are_rejected() {
    for field in ["make", "model", "vin", "color"] {
        let mut fields = corolla();
        match field {
            "make" => fields.make.clear(),
            "model" => fields.model.clear(),
            "vin" => fields.vin.clear(),
            _ => fields.color.clear(),
        }
        let errors = fields.validate().expect_err("blank field should fail");
        assert!(errors.field_errors().contains_key(field), "{} not reported", field);
    }
}

#[test]
fn year_and_price_bounds() {
    let mut fields = corolla();
    fields.year = 1885;
    assert!(fields.validate().is_err());

    fields.year = 1886;
    fields.price = 0.0;
    assert!(fields.validate().is_ok());

    fields.price = -0.01;
    assert!(fields.validate().is_err());
}

#[test]
fn non_finite_prices_are_rejected() {
    for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut fields = corolla();
        fields.price = price;
        assert!(fields.validate().is_err(), "{} accepted", price);
    }
}

#[test]
fn new_car_without_image_has_no_urls() {
    let car = Car::new(1, NewCar::without_image(corolla()));
    assert_eq!(car.id, 1);
    assert_eq!(car.fields(), corolla());
    assert_eq!(car.image_url, None);
    assert_eq!(car.thumbnail_url, None);
    assert_eq!(car.image_urls(), None);
}

#[test]
fn image_urls_are_set_together() {
    let urls = ImageUrls {
        image_url: "https://img.test/cars/a.jpg".to_string(),
        thumbnail_url: "https://img.test/thumbnails/a.jpg".to_string(),
    };
    let car = Car::new(2, NewCar::with_image(corolla(), urls.clone()));
    assert_eq!(car.image_url.as_deref(), Some("https://img.test/cars/a.jpg"));
    assert_eq!(car.thumbnail_url.as_deref(), Some("https://img.test/thumbnails/a.jpg"));
    assert_eq!(car.image_urls(), Some(urls));
}

#[test]
fn replace_fields_keeps_identity_and_images() {
    let urls = ImageUrls {
        image_url: "u".to_string(),
        thumbnail_url: "t".to_string(),
    };
    let mut car = Car::new(3, NewCar::with_image(corolla(), urls.clone()));

    let replacement = CarFields {
        make: "Ford".to_string(),
        model: "Focus".to_string(),
        year: 2019,
        price: 9999.99,
        vin: "WF0XXXGCDX1234567".to_string(),
        color: "grey".to_string(),
    };
    car.replace_fields(replacement.clone());

    assert_eq!(car.id, 3);
    assert_eq!(car.fields(), replacement);
    assert_eq!(car.image_urls(), Some(urls));
}

#[test]
fn car_serializes_with_null_image_fields() {
    let car = Car::new(4, NewCar::without_image(corolla()));
    let json = serde_json::to_value(&car).unwrap();
    assert_eq!(json["id"], 4);
    assert_eq!(json["vin"], "1HGCM82633A004352");
    assert!(json["image_url"].is_null());
    assert!(json["thumbnail_url"].is_null());
}
