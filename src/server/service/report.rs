use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::{car::CarRepository, report::ReportRepository},
    error::AppError,
    model::report::{CreateReportParams, Report, SearchReportsParams},
};

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a report and links it to the car carrying its plate.
    ///
    /// The plate is matched ignoring case. A plate that matches no car leaves the
    /// report unlinked; that is not an error.
    ///
    /// # Returns
    /// - `Ok(Report)` - Stored report, with `car_id` set when a car matched
    /// - `Err(AppError::Conflict)` - A report with this id already exists
    pub async fn create(&self, params: CreateReportParams) -> Result<Report, AppError> {
        let reports = ReportRepository::new(self.db);
        let id = params.id.clone();

        if reports.exists(&id).await? {
            return Err(duplicate_report(&id));
        }

        // A concurrent insert of the same id can still land between the check and here.
        let mut report = reports
            .create(params)
            .await
            .map_err(|e| conflict_on_duplicate(&id, e))?;

        let plate = report
            .car_plate
            .as_deref()
            .map(str::trim)
            .filter(|plate| !plate.is_empty());

        if let Some(plate) = plate {
            match CarRepository::new(self.db).find_by_plate(plate).await? {
                Some(car) => {
                    reports.set_car(&report.id, car.id).await?;
                    report.car_id = Some(car.id);
                }
                None => {
                    tracing::debug!("No car matches plate '{}' for report {}", plate, report.id);
                }
            }
        }

        Ok(report)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Report>, AppError> {
        Ok(ReportRepository::new(self.db).get_by_id(id).await?)
    }

    pub async fn get_by_car(&self, car_id: i32) -> Result<Vec<Report>, AppError> {
        Ok(ReportRepository::new(self.db).get_by_car(car_id).await?)
    }

    pub async fn search(&self, params: SearchReportsParams) -> Result<Vec<Report>, AppError> {
        Ok(ReportRepository::new(self.db).search(params).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !ReportRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Report not found".to_string()));
        }

        Ok(())
    }
}

fn duplicate_report(id: &str) -> AppError {
    AppError::Conflict(format!("Report {} already exists", id))
}

/// Maps a unique-key violation on insert to `Conflict`; other errors pass through.
pub(super) fn conflict_on_duplicate(id: &str, err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_report(id),
        _ => AppError::DbErr(err),
    }
}
