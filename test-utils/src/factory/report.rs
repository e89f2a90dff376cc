//! Report factory for creating test inspection report entities.

use crate::factory::helpers::{fold_plate, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test inspection reports.
///
/// Defaults to an issue report without car reference. `details` defaults to a
/// minimal JSON payload matching the `kind`.
pub struct ReportFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    kind: String,
    car_plate: Option<String>,
    car_id: Option<i32>,
    deleted: bool,
    created: chrono::DateTime<Utc>,
    details: String,
}

impl<'a> ReportFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("report-{}", id),
            kind: "issue".to_string(),
            car_plate: None,
            car_id: None,
            deleted: false,
            created: Utc::now(),
            details: serde_json::json!({
                "kind": "issue",
                "details": "Test issue",
                "priority": null,
                "issue_type": null,
                "is_resolved": false
            })
            .to_string(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn car_plate(mut self, plate: impl Into<String>) -> Self {
        self.car_plate = Some(plate.into());
        self
    }

    pub fn car_id(mut self, car_id: Option<i32>) -> Self {
        self.car_id = car_id;
        self
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn created(mut self, created: chrono::DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Builds and inserts the report entity into the database.
    pub async fn build(self) -> Result<entity::report::Model, DbErr> {
        entity::report::ActiveModel {
            id: ActiveValue::Set(self.id),
            kind: ActiveValue::Set(self.kind),
            author: ActiveValue::Set(None),
            created: ActiveValue::Set(self.created),
            car_plate_key: ActiveValue::Set(
                self.car_plate
                    .as_deref()
                    .map(fold_plate)
                    .filter(|key| !key.is_empty()),
            ),
            car_plate: ActiveValue::Set(self.car_plate),
            latitude: ActiveValue::Set(0.0),
            longitude: ActiveValue::Set(0.0),
            score: ActiveValue::Set(0),
            deleted: ActiveValue::Set(self.deleted),
            car_id: ActiveValue::Set(self.car_id),
            details: ActiveValue::Set(self.details),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an issue report with default values.
pub async fn create_report(db: &DatabaseConnection) -> Result<entity::report::Model, DbErr> {
    ReportFactory::new(db).build().await
}
