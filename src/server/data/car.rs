//! Car data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::car::{plate_key, Car, UpsertCarParams};

/// Repository providing database operations for fleet vehicles.
pub struct CarRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarRepository<'a> {
    /// Creates a new CarRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new car.
    ///
    /// # Returns
    /// - `Ok(Car)` - The created car
    /// - `Err(DbErr)` - Database error
    pub async fn create(&self, params: UpsertCarParams) -> Result<Car, DbErr> {
        let car = entity::car::ActiveModel {
            brand: ActiveValue::Set(params.brand),
            model: ActiveValue::Set(params.model),
            plate_key: ActiveValue::Set(params.plate.as_deref().map(plate_key)),
            plate: ActiveValue::Set(params.plate),
            car_type: ActiveValue::Set(params.car_type),
            fuel_type: ActiveValue::Set(params.fuel_type),
            vin: ActiveValue::Set(params.vin),
            color: ActiveValue::Set(params.color),
            year: ActiveValue::Set(params.year),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Car::from_entity(car))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Car>, DbErr> {
        let car = entity::prelude::Car::find_by_id(id).one(self.db).await?;

        Ok(car.map(Car::from_entity))
    }

    /// Gets all cars ordered by id.
    pub async fn get_all(&self) -> Result<Vec<Car>, DbErr> {
        let cars = entity::prelude::Car::find()
            .order_by_asc(entity::car::Column::Id)
            .all(self.db)
            .await?;

        Ok(cars.into_iter().map(Car::from_entity).collect())
    }

    /// Finds the car whose plate matches `plate` ignoring case.
    ///
    /// When several cars share a plate the one with the lowest id wins.
    ///
    /// # Arguments
    /// - `plate` - Plate as typed by the user, already trimmed
    ///
    /// # Returns
    /// - `Ok(Some(Car))` - Matching car
    /// - `Ok(None)` - No car carries this plate
    /// - `Err(DbErr)` - Database error
    pub async fn find_by_plate(&self, plate: &str) -> Result<Option<Car>, DbErr> {
        let car = entity::prelude::Car::find()
            .filter(entity::car::Column::PlateKey.eq(plate_key(plate)))
            .order_by_asc(entity::car::Column::Id)
            .one(self.db)
            .await?;

        Ok(car.map(Car::from_entity))
    }

    /// Replaces all editable fields of a car.
    ///
    /// # Returns
    /// - `Ok(Some(Car))` - The updated car
    /// - `Ok(None)` - No car with this id
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, id: i32, params: UpsertCarParams) -> Result<Option<Car>, DbErr> {
        let Some(car) = entity::prelude::Car::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::car::ActiveModel = car.into();
        active.brand = ActiveValue::Set(params.brand);
        active.model = ActiveValue::Set(params.model);
        active.plate_key = ActiveValue::Set(params.plate.as_deref().map(plate_key));
        active.plate = ActiveValue::Set(params.plate);
        active.car_type = ActiveValue::Set(params.car_type);
        active.fuel_type = ActiveValue::Set(params.fuel_type);
        active.vin = ActiveValue::Set(params.vin);
        active.color = ActiveValue::Set(params.color);
        active.year = ActiveValue::Set(params.year);
        active.notes = ActiveValue::Set(params.notes);

        let car = active.update(self.db).await?;

        Ok(Some(Car::from_entity(car)))
    }

    /// Deletes a car. Its reminders cascade; its reports keep a null `car_id`.
    ///
    /// # Returns
    /// - `Ok(true)` - Car deleted
    /// - `Ok(false)` - No car with this id
    /// - `Err(DbErr)` - Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Car::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Loads the cars referenced by a set of ids in one query.
    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Car>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cars = entity::prelude::Car::find()
            .filter(entity::car::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(cars.into_iter().map(Car::from_entity).collect())
    }
}
