use sea_orm::DatabaseConnection;

use crate::server::{
    data::car::CarRepository,
    error::AppError,
    model::car::{Car, UpsertCarParams},
};

pub struct CarService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new car.
    pub async fn create(&self, params: UpsertCarParams) -> Result<Car, AppError> {
        validate(&params)?;

        Ok(CarRepository::new(self.db).create(params).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Car>, AppError> {
        Ok(CarRepository::new(self.db).get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Car>, AppError> {
        Ok(CarRepository::new(self.db).get_by_id(id).await?)
    }

    /// Returns `"{model}-{plate}"` labels for every car that has a plate.
    pub async fn get_plates(&self) -> Result<Vec<String>, AppError> {
        let cars = CarRepository::new(self.db).get_all().await?;

        Ok(cars.iter().filter_map(Car::plate_label).collect())
    }

    /// Replaces a car's fields.
    ///
    /// # Returns
    /// - `Ok(Car)` - Updated car
    /// - `Err(AppError::NotFound)` - No car with this id
    /// - `Err(AppError::BadRequest)` - Model is blank
    pub async fn update(&self, id: i32, params: UpsertCarParams) -> Result<Car, AppError> {
        validate(&params)?;

        CarRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !CarRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        Ok(())
    }
}

fn validate(params: &UpsertCarParams) -> Result<(), AppError> {
    if params.model.trim().is_empty() {
        return Err(AppError::BadRequest("Car model is required".to_string()));
    }

    Ok(())
}
