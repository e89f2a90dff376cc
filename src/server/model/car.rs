//! Car domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::{car::CarDto, car::UpsertCarDto, notification::CarSummaryDto};

/// Fleet vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: i32,
    pub brand: Option<String>,
    pub model: String,
    pub plate: Option<String>,
    pub car_type: Option<String>,
    pub fuel_type: Option<String>,
    pub vin: Option<String>,
    pub color: Option<String>,
    pub year: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Converts an entity model to a car domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Car` - The converted car domain model
    pub fn from_entity(entity: entity::car::Model) -> Self {
        Self {
            id: entity.id,
            brand: entity.brand,
            model: entity.model,
            plate: entity.plate,
            car_type: entity.car_type,
            fuel_type: entity.fuel_type,
            vin: entity.vin,
            color: entity.color,
            year: entity.year,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CarDto {
        CarDto {
            id: self.id,
            brand: self.brand,
            model: self.model,
            plate: self.plate,
            car_type: self.car_type,
            fuel_type: self.fuel_type,
            vin: self.vin,
            color: self.color,
            year: self.year,
            notes: self.notes,
            created_at: self.created_at,
        }
    }

    /// Flat projection embedded in realtime notifications.
    pub fn summary(&self) -> CarSummaryDto {
        CarSummaryDto {
            id: self.id,
            brand: self.brand.clone(),
            model: self.model.clone(),
            plate: self.plate.clone(),
        }
    }

    /// Label used by the plate picker, `"{model}-{plate}"`.
    pub fn plate_label(&self) -> Option<String> {
        self.plate
            .as_ref()
            .map(|plate| format!("{}-{}", self.model, plate))
    }
}

/// Case-folded form of a plate, stored alongside it and used for every lookup.
///
/// SQLite's `LOWER` only folds ASCII, so folding happens here rather than in SQL.
pub fn plate_key(plate: &str) -> String {
    plate.trim().to_lowercase()
}

/// Field values for creating or replacing a car.
#[derive(Debug, Clone)]
pub struct UpsertCarParams {
    pub brand: Option<String>,
    pub model: String,
    pub plate: Option<String>,
    pub car_type: Option<String>,
    pub fuel_type: Option<String>,
    pub vin: Option<String>,
    pub color: Option<String>,
    pub year: Option<i32>,
    pub notes: Option<String>,
}

impl UpsertCarParams {
    pub fn from_dto(dto: UpsertCarDto) -> Self {
        Self {
            brand: dto.brand,
            model: dto.model,
            plate: dto
                .plate
                .map(|plate| plate.trim().to_string())
                .filter(|plate| !plate.is_empty()),
            car_type: dto.car_type,
            fuel_type: dto.fuel_type,
            vin: dto.vin,
            color: dto.color,
            year: dto.year,
            notes: dto.notes,
        }
    }
}
