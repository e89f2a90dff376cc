use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CarDto {
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

/// Request body for both creating and replacing a car.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpsertCarDto {
    pub brand: Option<String>,
    pub model: String,
    pub plate: Option<String>,
    #[serde(default)]
    pub car_type: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}
