pub mod sqlx_car_repository;
