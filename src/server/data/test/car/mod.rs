use crate::server::{data::car::CarRepository, model::car::UpsertCarParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_by_plate;

fn params(model: &str, plate: Option<&str>) -> UpsertCarParams {
    UpsertCarParams {
        brand: Some("Toyota".to_string()),
        model: model.to_string(),
        plate: plate.map(str::to_string),
        car_type: Some("Pickup".to_string()),
        fuel_type: Some("Diesel".to_string()),
        vin: None,
        color: None,
        year: Some(2022),
        notes: None,
    }
}
