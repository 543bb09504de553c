use super::entity::{Car, CarFields, NewCar};
use super::errors::DomainError;
use async_trait::async_trait;

/// Persistence boundary for cars.
///
/// `create` and `replace` are atomic: either every field is written or none is.
/// A VIN collision on either surfaces as [`DomainError::DuplicateKey`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn create(&self, car: &NewCar) -> Result<Car, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Car, DomainError>;
    async fn find_all(&self) -> Result<Vec<Car>, DomainError>;
    async fn replace(&self, id: i32, fields: &CarFields) -> Result<Car, DomainError>;
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
