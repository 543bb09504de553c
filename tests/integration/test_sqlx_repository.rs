use super::helpers::{corolla, test_database, unique_vin};
use dealership_api::{
    domain::car::{
        entity::{CarFields, ImageUrls, NewCar},
        errors::DomainError,
        repository::CarRepository,
    },
    infrastructure::repositories::sqlx_car_repository::SqlxCarRepository,
};

/// SERIAL ids start at 1, so this row never exists.
const MISSING_ID: i32 = -1;

fn fresh_fields() -> CarFields {
    CarFields {
        vin: unique_vin(),
        ..corolla()
    }
}

fn urls(vin: &str) -> ImageUrls {
    ImageUrls {
        image_url: format!("https://cars.test/cars/{}.jpg", vin),
        thumbnail_url: format!("https://thumbs.test/thumbnails/{}.jpg", vin),
    }
}

#[tokio::test]
async fn insert_assigns_id_and_round_trips_image_pair() {
    let Some(db) = test_database().await else { return };
    let repo = SqlxCarRepository::new(db);

    let fields = fresh_fields();
    let new_car = NewCar::with_image(fields.clone(), urls(&fields.vin));
    let created = repo.create(&new_car).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.fields(), fields);
    assert_eq!(created.image_urls(), Some(urls(&fields.vin)));
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), created);

    let plain = repo
        .create(&NewCar::without_image(fresh_fields()))
        .await
        .unwrap();
    assert!(plain.id > created.id);
    assert_eq!(repo.find_by_id(plain.id).await.unwrap().image_urls(), None);
}

#[tokio::test]
async fn duplicate_vin_on_insert_is_a_duplicate_key() {
    let Some(db) = test_database().await else { return };
    let repo = SqlxCarRepository::new(db.clone());

    let fields = fresh_fields();
    repo.create(&NewCar::without_image(fields.clone())).await.unwrap();

    let err = repo
        .create(&NewCar::without_image(fields.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateKey(ref vin) if *vin == fields.vin));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars WHERE vin = $1")
        .bind(&fields.vin)
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn replace_onto_taken_vin_is_a_duplicate_key() {
    let Some(db) = test_database().await else { return };
    let repo = SqlxCarRepository::new(db);

    let first = repo
        .create(&NewCar::without_image(fresh_fields()))
        .await
        .unwrap();
    let second = repo
        .create(&NewCar::without_image(fresh_fields()))
        .await
        .unwrap();

    let update = CarFields {
        vin: first.vin.clone(),
        ..second.fields()
    };
    let err = repo.replace(second.id, &update).await.unwrap_err();
    assert!(matches!(err, DomainError::DuplicateKey(_)));
    assert_eq!(repo.find_by_id(second.id).await.unwrap(), second);
}

#[tokio::test]
async fn replace_keeps_id_and_image_pair() {
    let Some(db) = test_database().await else { return };
    let repo = SqlxCarRepository::new(db);

    let fields = fresh_fields();
    let created = repo
        .create(&NewCar::with_image(fields.clone(), urls(&fields.vin)))
        .await
        .unwrap();

    let update = CarFields {
        price: 18500.0,
        color: "red".into(),
        ..fresh_fields()
    };
    let replaced = repo.replace(created.id, &update).await.unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.fields(), update);
    assert_eq!(replaced.image_urls(), created.image_urls());
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), replaced);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let Some(db) = test_database().await else { return };
    let repo = SqlxCarRepository::new(db);

    assert!(matches!(
        repo.find_by_id(MISSING_ID).await,
        Err(DomainError::NotFound(MISSING_ID))
    ));
    assert!(matches!(
        repo.replace(MISSING_ID, &fresh_fields()).await,
        Err(DomainError::NotFound(MISSING_ID))
    ));
    assert!(matches!(
        repo.delete(MISSING_ID).await,
        Err(DomainError::NotFound(MISSING_ID))
    ));
}

#[tokio::test]
async fn delete_removes_row_once() {
    let Some(db) = test_database().await else { return };
    let repo = SqlxCarRepository::new(db);

    let created = repo
        .create(&NewCar::without_image(fresh_fields()))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();
    assert!(matches!(
        repo.find_by_id(created.id).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete(created.id).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(repo.find_all().await.unwrap().iter().all(|c| c.id != created.id));
}

#[tokio::test]
async fn schema_rejects_half_an_image_pair() {
    let Some(db) = test_database().await else { return };
    let fields = fresh_fields();

    let result = sqlx::query(
        "INSERT INTO cars (make, model, year, price, vin, color, image_url, thumbnail_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7, NULL)",
    )
    .bind(&fields.make)
    .bind(&fields.model)
    .bind(fields.year)
    .bind(fields.price)
    .bind(&fields.vin)
    .bind(&fields.color)
    .bind("https://cars.test/cars/orphan.jpg")
    .execute(&db)
    .await;

    let err = result.unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code().map(|c| c.into_owned()));
    assert_eq!(code.as_deref(), Some("23514"));
}
