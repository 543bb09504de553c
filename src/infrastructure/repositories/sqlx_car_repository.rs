use crate::domain::car::{
    entity::{Car, CarFields, NewCar},
    errors::DomainError,
    repository::CarRepository,
};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument, warn};

const UNIQUE_VIOLATION: &str = "23505";

const CAR_COLUMNS: &str = "id, make, model, year, price, vin, color, image_url, thumbnail_url";

#[derive(FromRow)]
struct CarRow {
    id: i32,
    make: String,
    model: String,
    year: i32,
    price: f64,
    vin: String,
    color: String,
    image_url: Option<String>,
    thumbnail_url: Option<String>,
}

impl From<CarRow> for Car {
    fn from(r: CarRow) -> Self {
        Car {
            id: r.id,
            make: r.make,
            model: r.model,
            year: r.year,
            price: r.price,
            vin: r.vin,
            color: r.color,
            image_url: r.image_url,
            thumbnail_url: r.thumbnail_url,
        }
    }
}

/// Maps a write failure, singling out VIN collisions.
fn write_error(err: sqlx::Error, vin: &str, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            warn!("VIN {} already exists, {} rejected", vin, action);
            return DomainError::DuplicateKey(vin.to_string());
        }
    }
    error!("Failed to {} car with VIN {}: {}", action, vin, err);
    DomainError::InfrastructureError(format!("Failed to {} car: {}", action, err))
}

pub struct SqlxCarRepository {
    pub pool: PgPool,
}

impl SqlxCarRepository {
    /// Creates a new instance of the repository with the provided database pool.
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxCarRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for SqlxCarRepository {
    /// Inserts a car in a single statement; the generated id comes back
    /// through `RETURNING`.
    ///
    /// # Errors
    /// `DomainError::DuplicateKey` when the VIN is taken,
    /// `DomainError::InfrastructureError` for other database failures.
    #[instrument(skip(self, car), fields(vin = %car.fields.vin))]
    async fn create(&self, car: &NewCar) -> Result<Car, DomainError> {
        let f = &car.fields;
        let image_url = car.images.as_ref().map(|u| u.image_url.as_str());
        let thumbnail_url = car.images.as_ref().map(|u| u.thumbnail_url.as_str());

        let row = sqlx::query_as::<_, CarRow>(&format!(
            "INSERT INTO cars (make, model, year, price, vin, color, image_url, thumbnail_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            CAR_COLUMNS
        ))
        .bind(&f.make)
        .bind(&f.model)
        .bind(f.year)
        .bind(f.price)
        .bind(&f.vin)
        .bind(&f.color)
        .bind(image_url)
        .bind(thumbnail_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &f.vin, "create"))?;

        info!("Created car {} ({} {})", row.id, row.make, row.model);
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Car, DomainError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            "SELECT {} FROM cars WHERE id = $1",
            CAR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch car {}: {}", id, e);
            DomainError::InfrastructureError(format!("Failed to retrieve car: {}", e))
        })?;

        row.map(Car::from).ok_or(DomainError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Car>, DomainError> {
        let rows = sqlx::query_as::<_, CarRow>(&format!(
            "SELECT {} FROM cars ORDER BY id",
            CAR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list cars: {}", e);
            DomainError::InfrastructureError(format!("Failed to retrieve cars: {}", e))
        })?;

        debug!("Retrieved {} cars", rows.len());
        Ok(rows.into_iter().map(Car::from).collect())
    }

    /// Overwrites every business field of car `id` in one statement. The image
    /// URL pair is not part of the payload and stays as stored.
    #[instrument(skip(self, update), fields(vin = %update.vin))]
    async fn replace(&self, id: i32, update: &CarFields) -> Result<Car, DomainError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            "UPDATE cars
             SET make = $1, model = $2, year = $3, price = $4, vin = $5, color = $6
             WHERE id = $7
             RETURNING {}",
            CAR_COLUMNS
        ))
        .bind(&update.make)
        .bind(&update.model)
        .bind(update.year)
        .bind(update.price)
        .bind(&update.vin)
        .bind(&update.color)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &update.vin, "replace"))?;

        match row {
            Some(row) => {
                info!("Replaced car {}", id);
                Ok(row.into())
            }
            None => Err(DomainError::NotFound(id)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete car {}: {}", id, e);
                DomainError::InfrastructureError(format!("Failed to delete car: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(id));
        }

        info!("Deleted car {}", id);
        Ok(())
    }
}
