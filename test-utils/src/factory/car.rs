//! Car factory for creating test car entities.

use crate::factory::helpers::{fold_plate, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test cars with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::car::CarFactory;
///
/// let car = CarFactory::new(&db)
///     .plate("ABC123")
///     .model("Corolla")
///     .build()
///     .await?;
/// ```
pub struct CarFactory<'a> {
    db: &'a DatabaseConnection,
    brand: Option<String>,
    model: String,
    plate: Option<String>,
    year: Option<i32>,
}

impl<'a> CarFactory<'a> {
    /// Creates a new CarFactory with default values.
    ///
    /// Defaults:
    /// - brand: `Some("Toyota")`
    /// - model: `"Model {id}"` where id is auto-incremented
    /// - plate: `Some("TST{id}")`
    /// - year: `Some(2020)`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            brand: Some("Toyota".to_string()),
            model: format!("Model {}", id),
            plate: Some(format!("TST{}", id)),
            year: Some(2020),
        }
    }

    pub fn brand(mut self, brand: Option<String>) -> Self {
        self.brand = brand;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }

    pub fn no_plate(mut self) -> Self {
        self.plate = None;
        self
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Builds and inserts the car entity into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created car entity
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::car::Model, DbErr> {
        entity::car::ActiveModel {
            brand: ActiveValue::Set(self.brand),
            model: ActiveValue::Set(self.model),
            plate_key: ActiveValue::Set(self.plate.as_deref().map(fold_plate)),
            plate: ActiveValue::Set(self.plate),
            car_type: ActiveValue::Set(None),
            fuel_type: ActiveValue::Set(None),
            vin: ActiveValue::Set(None),
            color: ActiveValue::Set(None),
            year: ActiveValue::Set(self.year),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a car with default values.
pub async fn create_car(db: &DatabaseConnection) -> Result<entity::car::Model, DbErr> {
    CarFactory::new(db).build().await
}
