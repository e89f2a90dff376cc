use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct EntryExitDetailsDto {
    pub mileage: Option<i64>,
    pub fuel_level: Option<i32>,
    pub notes: Option<String>,
    pub tires_state: Option<String>,
    pub paint_state: Option<String>,
    pub mechanical_state: Option<String>,
    pub oil_level: Option<String>,
    pub interior_state: Option<String>,
    #[serde(default)]
    pub has_spare_tire: bool,
    #[serde(default)]
    pub has_emergency_kit: bool,
    #[serde(default)]
    pub has_charger: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CrashDetailsDto {
    pub date_of_crash: DateTime<Utc>,
    pub crash_details: Option<String>,
    pub location: Option<String>,
    pub crashed_parts: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct IssueDetailsDto {
    pub details: Option<String>,
    pub priority: Option<String>,
    pub issue_type: Option<String>,
    #[serde(default)]
    pub is_resolved: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct VehicleReturnDetailsDto {
    pub mileage: i64,
    pub notes: Option<String>,
}

/// Kind-specific report fields, tagged by `kind`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportDetailsDto {
    EntryExit(EntryExitDetailsDto),
    Crash(CrashDetailsDto),
    Issue(IssueDetailsDto),
    VehicleReturn(VehicleReturnDetailsDto),
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateReportDto {
    /// Client-generated id; a UUID is generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    pub car_plate: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub score: i32,
    pub details: ReportDetailsDto,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ReportDto {
    pub id: String,
    pub author: Option<String>,
    pub created: DateTime<Utc>,
    pub car_plate: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub score: i32,
    pub deleted: bool,
    pub car_id: Option<i32>,
    pub details: ReportDetailsDto,
}
