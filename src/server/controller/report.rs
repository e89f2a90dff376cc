use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        report::{CreateReportDto, ReportDto},
    },
    server::{
        error::AppError,
        model::report::{CreateReportParams, Report, ReportKind, SearchReportsParams},
        service::report::ReportService,
        state::AppState,
    },
};

/// Tag for grouping report endpoints in OpenAPI documentation
pub static REPORT_TAG: &str = "report";

#[derive(Deserialize, IntoParams)]
pub struct SearchReportsQuery {
    /// Case-insensitive plate fragment
    pub plate: Option<String>,
    /// One of `entry_exit`, `crash`, `issue`, `vehicle_return`
    pub kind: Option<String>,
}

/// Submit an inspection report.
///
/// The report's plate is matched against the fleet ignoring case; on a match the
/// report is linked to that car. An unknown plate is accepted and left unlinked.
///
/// # Returns
/// - `201 Created` - The stored report
/// - `409 Conflict` - A report with the supplied id already exists
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = REPORT_TAG,
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Successfully stored report", body = ReportDto),
        (status = 409, description = "Report id already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateReportDto>,
) -> Result<impl IntoResponse, AppError> {
    let report = ReportService::new(&state.db)
        .create(CreateReportParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(report.into_dto())))
}

/// Get a report by id.
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved report", body = ReportDto),
        (status = 404, description = "Report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = ReportService::new(&state.db)
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

/// Soft-delete a report.
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 204, description = "Successfully deleted report"),
        (status = 404, description = "Report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ReportService::new(&state.db).delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List a car's reports, newest first, at most 200.
#[utoipa::path(
    get,
    path = "/api/reports/by-car/{car_id}",
    tag = REPORT_TAG,
    params(
        ("car_id" = i32, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved reports", body = Vec<ReportDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reports_by_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let reports = ReportService::new(&state.db).get_by_car(car_id).await?;

    Ok((StatusCode::OK, Json(into_dtos(reports))))
}

/// Search reports by plate fragment and kind.
///
/// # Returns
/// - `200 OK` - Matching live reports, newest first
/// - `400 Bad Request` - Unknown report kind
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/reports/search",
    tag = REPORT_TAG,
    params(SearchReportsQuery),
    responses(
        (status = 200, description = "Successfully searched reports", body = Vec<ReportDto>),
        (status = 400, description = "Unknown report kind", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_reports(
    State(state): State<AppState>,
    Query(query): Query<SearchReportsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kind = match query.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(kind) => Some(
            ReportKind::parse(kind)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown report kind '{}'", kind)))?,
        ),
        None => None,
    };

    let reports = ReportService::new(&state.db)
        .search(SearchReportsParams {
            plate: query.plate,
            kind,
        })
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(reports))))
}

fn into_dtos(reports: Vec<Report>) -> Vec<ReportDto> {
    reports.into_iter().map(Report::into_dto).collect()
}
