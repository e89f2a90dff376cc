use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        car::{CarDto, UpsertCarDto},
    },
    server::{
        error::AppError,
        model::car::{Car, UpsertCarParams},
        service::car::CarService,
        state::AppState,
    },
};

/// Tag for grouping car endpoints in OpenAPI documentation
pub static CAR_TAG: &str = "car";

/// List all cars.
///
/// # Returns
/// - `200 OK` - All cars ordered by id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/cars",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "Successfully retrieved cars", body = Vec<CarDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cars(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cars = CarService::new(&state.db).get_all().await?;

    Ok((
        StatusCode::OK,
        Json(cars.into_iter().map(Car::into_dto).collect::<Vec<_>>()),
    ))
}

/// Register a new car.
///
/// # Returns
/// - `201 Created` - The created car
/// - `400 Bad Request` - Model is blank
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/cars",
    tag = CAR_TAG,
    request_body = UpsertCarDto,
    responses(
        (status = 201, description = "Successfully created car", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<UpsertCarDto>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarService::new(&state.db)
        .create(UpsertCarParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(car.into_dto())))
}

/// List plate labels in the form `"{model}-{plate}"`.
///
/// Cars without a plate are left out.
#[utoipa::path(
    get,
    path = "/api/cars/plates",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "Successfully retrieved plate labels", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_plates(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let plates = CarService::new(&state.db).get_plates().await?;

    Ok((StatusCode::OK, Json(plates)))
}

/// Get a car by id.
///
/// # Returns
/// - `200 OK` - The car
/// - `404 Not Found` - No car with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved car", body = CarDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    Ok((StatusCode::OK, Json(car.into_dto())))
}

/// Replace a car's fields.
///
/// # Returns
/// - `200 OK` - The updated car
/// - `400 Bad Request` - Model is blank
/// - `404 Not Found` - No car with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car id")
    ),
    request_body = UpsertCarDto,
    responses(
        (status = 200, description = "Successfully updated car", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpsertCarDto>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarService::new(&state.db)
        .update(id, UpsertCarParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(car.into_dto())))
}

/// Delete a car.
///
/// Its reminders are deleted with it; its reports stay and lose the car link.
#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car id")
    ),
    responses(
        (status = 204, description = "Successfully deleted car"),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    CarService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
