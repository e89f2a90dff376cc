//! Inspection report domain models and parameters.
//!
//! All report kinds share one table. The kind-specific fields are kept as JSON in
//! the `details` column and decoded into `ReportDetailsDto` on the way out.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::report::{CreateReportDto, ReportDetailsDto, ReportDto};

/// Discriminator stored in the `kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    EntryExit,
    Crash,
    Issue,
    VehicleReturn,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntryExit => "entry_exit",
            Self::Crash => "crash",
            Self::Issue => "issue",
            Self::VehicleReturn => "vehicle_return",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "entry_exit" => Some(Self::EntryExit),
            "crash" => Some(Self::Crash),
            "issue" => Some(Self::Issue),
            "vehicle_return" => Some(Self::VehicleReturn),
            _ => None,
        }
    }

    pub fn of(details: &ReportDetailsDto) -> Self {
        match details {
            ReportDetailsDto::EntryExit(_) => Self::EntryExit,
            ReportDetailsDto::Crash(_) => Self::Crash,
            ReportDetailsDto::Issue(_) => Self::Issue,
            ReportDetailsDto::VehicleReturn(_) => Self::VehicleReturn,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: String,
    pub kind: ReportKind,
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

impl Report {
    /// Converts an entity model to a report domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Report)` - The converted report
    /// - `Err(DbErr::Type)` - Stored details do not decode, or disagree with the stored kind
    pub fn from_entity(entity: entity::report::Model) -> Result<Self, DbErr> {
        let details: ReportDetailsDto = serde_json::from_str(&entity.details).map_err(|e| {
            DbErr::Type(format!(
                "Report {} has undecodable details: {}",
                entity.id, e
            ))
        })?;
        let kind = ReportKind::of(&details);

        if ReportKind::parse(&entity.kind) != Some(kind) {
            return Err(DbErr::Type(format!(
                "Report {} has kind '{}' but details of kind '{}'",
                entity.id,
                entity.kind,
                kind.as_str()
            )));
        }

        Ok(Self {
            id: entity.id,
            kind,
            author: entity.author,
            created: entity.created,
            car_plate: entity.car_plate,
            latitude: entity.latitude,
            longitude: entity.longitude,
            score: entity.score,
            deleted: entity.deleted,
            car_id: entity.car_id,
            details,
        })
    }

    pub fn into_dto(self) -> ReportDto {
        ReportDto {
            id: self.id,
            author: self.author,
            created: self.created,
            car_plate: self.car_plate,
            latitude: self.latitude,
            longitude: self.longitude,
            score: self.score,
            deleted: self.deleted,
            car_id: self.car_id,
            details: self.details,
        }
    }
}

/// Parameters for inserting a report. The id is already decided.
#[derive(Debug, Clone)]
pub struct CreateReportParams {
    pub id: String,
    pub author: Option<String>,
    pub created: DateTime<Utc>,
    pub car_plate: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub score: i32,
    pub details: ReportDetailsDto,
}

impl CreateReportParams {
    /// Builds insert parameters, generating a UUID v4 when the client sent no id.
    pub fn from_dto(dto: CreateReportDto) -> Self {
        let id = dto
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Self {
            id,
            author: dto.author,
            created: dto.created.unwrap_or_else(Utc::now),
            car_plate: dto.car_plate,
            latitude: dto.latitude,
            longitude: dto.longitude,
            score: dto.score,
            details: dto.details,
        }
    }

    pub fn kind(&self) -> ReportKind {
        ReportKind::of(&self.details)
    }
}

/// Filters for report search. Deleted reports are never returned.
#[derive(Debug, Clone, Default)]
pub struct SearchReportsParams {
    /// Case-insensitive substring of the plate.
    pub plate: Option<String>,
    pub kind: Option<ReportKind>,
}
