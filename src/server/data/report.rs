//! Inspection report data repository for database operations.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    car::plate_key,
    report::{CreateReportParams, Report, SearchReportsParams},
};

/// Maximum number of reports returned for a single car.
pub const REPORTS_BY_CAR_LIMIT: u64 = 200;

/// Repository providing database operations for inspection reports of every kind.
pub struct ReportRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportRepository<'a> {
    /// Creates a new ReportRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether a report with this id exists, deleted or not.
    pub async fn exists(&self, id: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Report::find()
            .filter(entity::report::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a report with no car reference.
    ///
    /// # Returns
    /// - `Ok(Report)` - The stored report
    /// - `Err(DbErr::Type)` - Details could not be encoded
    /// - `Err(DbErr)` - Database error, including a primary key conflict
    pub async fn create(&self, params: CreateReportParams) -> Result<Report, DbErr> {
        let kind = params.kind();
        let details = serde_json::to_string(&params.details).map_err(|e| {
            DbErr::Type(format!("Failed to encode details of report {}: {}", params.id, e))
        })?;
        let car_plate_key = params
            .car_plate
            .as_deref()
            .map(plate_key)
            .filter(|key| !key.is_empty());

        let report = entity::report::ActiveModel {
            id: ActiveValue::Set(params.id),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            author: ActiveValue::Set(params.author),
            created: ActiveValue::Set(params.created),
            car_plate: ActiveValue::Set(params.car_plate),
            car_plate_key: ActiveValue::Set(car_plate_key),
            latitude: ActiveValue::Set(params.latitude),
            longitude: ActiveValue::Set(params.longitude),
            score: ActiveValue::Set(params.score),
            deleted: ActiveValue::Set(false),
            car_id: ActiveValue::Set(None),
            details: ActiveValue::Set(details),
        }
        .insert(self.db)
        .await?;

        Report::from_entity(report)
    }

    /// Links a report to a car.
    pub async fn set_car(&self, id: &str, car_id: i32) -> Result<(), DbErr> {
        entity::report::ActiveModel {
            id: ActiveValue::Unchanged(id.to_string()),
            car_id: ActiveValue::Set(Some(car_id)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Gets a report by id, including soft-deleted ones.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Report>, DbErr> {
        let report = entity::prelude::Report::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        report.map(Report::from_entity).transpose()
    }

    /// Gets the live reports of one car, newest first, capped at `REPORTS_BY_CAR_LIMIT`.
    pub async fn get_by_car(&self, car_id: i32) -> Result<Vec<Report>, DbErr> {
        let reports = entity::prelude::Report::find()
            .filter(entity::report::Column::CarId.eq(car_id))
            .filter(entity::report::Column::Deleted.eq(false))
            .order_by_desc(entity::report::Column::Created)
            .limit(REPORTS_BY_CAR_LIMIT)
            .all(self.db)
            .await?;

        reports.into_iter().map(Report::from_entity).collect()
    }

    /// Searches live reports by plate substring (case-insensitive) and kind.
    pub async fn search(&self, params: SearchReportsParams) -> Result<Vec<Report>, DbErr> {
        let mut query = entity::prelude::Report::find()
            .filter(entity::report::Column::Deleted.eq(false))
            .order_by_desc(entity::report::Column::Created);

        if let Some(plate) = params
            .plate
            .as_deref()
            .map(str::trim)
            .filter(|plate| !plate.is_empty())
        {
            query = query.filter(Expr::cust_with_values(
                "car_plate_key LIKE ? ESCAPE '\\'",
                [contains_pattern(&plate_key(plate))],
            ));
        }

        if let Some(kind) = params.kind {
            query = query.filter(entity::report::Column::Kind.eq(kind.as_str()));
        }

        let reports = query.all(self.db).await?;

        reports.into_iter().map(Report::from_entity).collect()
    }

    /// Marks a report as deleted without removing the row.
    ///
    /// # Returns
    /// - `Ok(true)` - Report flagged as deleted
    /// - `Ok(false)` - No report with this id
    /// - `Err(DbErr)` - Database error
    pub async fn soft_delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Report::update_many()
            .col_expr(entity::report::Column::Deleted, Expr::value(true))
            .filter(entity::report::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// `LIKE` pattern matching `fragment` anywhere, with wildcards in it taken literally.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
