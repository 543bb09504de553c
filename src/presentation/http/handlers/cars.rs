use super::{
    form::{CarForm, read_image},
    json::JsonBody,
};
use crate::{
    domain::car::entity::{Car, CarFields},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde_json::{Value, json};

pub async fn create_car(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<CarFields>,
) -> Result<Json<Car>, AppError> {
    let car = state.car_service.create_car(fields).await?;
    Ok(Json(car))
}

/// Multipart variant of car creation: the car fields as text parts plus an
/// optional `image` file part.
pub async fn create_car_with_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Car>, AppError> {
    let mut form = CarForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            image = read_image(field).await?;
        } else {
            let value = field.text().await?;
            if !form.set(&name, value) {
                tracing::debug!("Ignoring unexpected form field {}", name);
            }
        }
    }

    let fields = form.into_fields()?;
    let car = state
        .car_service
        .create_car_with_image(fields, image)
        .await?;
    Ok(Json(car))
}

pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, AppError> {
    Ok(Json(state.car_service.list_cars().await?))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Car>, AppError> {
    Ok(Json(state.car_service.get_car(id).await?))
}

pub async fn replace_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(fields): JsonBody<CarFields>,
) -> Result<Json<Car>, AppError> {
    Ok(Json(state.car_service.replace_car(id, fields).await?))
}

pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    state.car_service.delete_car(id).await?;
    Ok(Json(json!({ "detail": "Car deleted" })))
}
