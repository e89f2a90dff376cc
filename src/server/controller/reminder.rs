use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        reminder::{CreateReminderDto, ReminderDto, UpdateReminderDto},
    },
    server::{
        error::AppError,
        model::reminder::{CreateReminderParams, Reminder, UpdateReminderParams},
        service::reminder::ReminderService,
        state::AppState,
    },
};

/// Tag for grouping reminder endpoints in OpenAPI documentation
pub static REMINDER_TAG: &str = "reminder";

/// List all reminders, newest due date first.
#[utoipa::path(
    get,
    path = "/api/reminders",
    tag = REMINDER_TAG,
    responses(
        (status = 200, description = "Successfully retrieved reminders", body = Vec<ReminderDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reminders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let reminders = ReminderService::new(&state.db).get_all().await?;

    Ok((StatusCode::OK, Json(into_dtos(reminders))))
}

/// Schedule a reminder for a car.
///
/// Creates one pending destination per distinct recipient id. The reminder is
/// picked up by the dispatch loop once its date falls inside the due window.
///
/// # Returns
/// - `201 Created` - The created reminder
/// - `404 Not Found` - The car does not exist
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/reminders",
    tag = REMINDER_TAG,
    request_body = CreateReminderDto,
    responses(
        (status = 201, description = "Successfully created reminder", body = ReminderDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    Json(payload): Json<CreateReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let reminder = ReminderService::new(&state.db)
        .create(CreateReminderParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(reminder.into_dto())))
}

/// Get a reminder with its destinations.
#[utoipa::path(
    get,
    path = "/api/reminders/{id}",
    tag = REMINDER_TAG,
    params(
        ("id" = i32, Path, description = "Reminder id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved reminder", body = ReminderDto),
        (status = 404, description = "Reminder not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reminder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let reminder = ReminderService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

/// Replace a reminder.
///
/// A changed `reminder_date` reschedules the reminder and resets its destinations.
/// A `recipients` list replaces the destinations.
#[utoipa::path(
    put,
    path = "/api/reminders/{id}",
    tag = REMINDER_TAG,
    params(
        ("id" = i32, Path, description = "Reminder id")
    ),
    request_body = UpdateReminderDto,
    responses(
        (status = 200, description = "Successfully updated reminder", body = ReminderDto),
        (status = 404, description = "Reminder or car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let reminder = ReminderService::new(&state.db)
        .update(UpdateReminderParams::from_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

/// Delete a reminder and its destinations.
#[utoipa::path(
    delete,
    path = "/api/reminders/{id}",
    tag = REMINDER_TAG,
    params(
        ("id" = i32, Path, description = "Reminder id")
    ),
    responses(
        (status = 204, description = "Successfully deleted reminder"),
        (status = 404, description = "Reminder not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ReminderService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List a car's reminders, newest due date first.
#[utoipa::path(
    get,
    path = "/api/reminders/by-car/{car_id}",
    tag = REMINDER_TAG,
    params(
        ("car_id" = i32, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved reminders", body = Vec<ReminderDto>),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reminders_by_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let reminders = ReminderService::new(&state.db).get_by_car(car_id).await?;

    Ok((StatusCode::OK, Json(into_dtos(reminders))))
}

fn into_dtos(reminders: Vec<Reminder>) -> Vec<ReminderDto> {
    reminders.into_iter().map(Reminder::into_dto).collect()
}
