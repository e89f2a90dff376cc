use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        car::{self, create_car, delete_car, get_car, get_cars, get_plates, update_car},
        notification::{self, notifications_ws},
        reminder::{
            self, create_reminder, delete_reminder, get_reminder, get_reminders,
            get_reminders_by_car, update_reminder,
        },
        report::{
            self, create_report, delete_report, get_report, get_reports_by_car, search_reports,
        },
    },
    state::AppState,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        car::get_cars,
        car::create_car,
        car::get_plates,
        car::get_car,
        car::update_car,
        car::delete_car,
        reminder::get_reminders,
        reminder::create_reminder,
        reminder::get_reminder,
        reminder::update_reminder,
        reminder::delete_reminder,
        reminder::get_reminders_by_car,
        report::create_report,
        report::get_report,
        report::delete_report,
        report::get_reports_by_car,
        report::search_reports,
        notification::notifications_ws,
    ),
    components(
        schemas(
            crate::model::api::ErrorDto,
            crate::model::car::CarDto,
            crate::model::car::UpsertCarDto,
            crate::model::reminder::ReminderDto,
            crate::model::reminder::ReminderDestDto,
            crate::model::reminder::CreateReminderDto,
            crate::model::reminder::UpdateReminderDto,
            crate::model::report::CreateReportDto,
            crate::model::report::ReportDto,
            crate::model::report::ReportDetailsDto,
            crate::model::notification::NotificationEnvelopeDto,
            crate::model::notification::ReminderNotificationDto,
            crate::model::notification::CarSummaryDto,
        )
    ),
    tags(
        (name = "car", description = "Fleet vehicles"),
        (name = "reminder", description = "Scheduled vehicle reminders"),
        (name = "report", description = "Inspection reports"),
        (name = "notification", description = "Realtime notifications"),
    ),
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cars", get(get_cars).post(create_car))
        .route("/api/cars/plates", get(get_plates))
        .route(
            "/api/cars/{id}",
            get(get_car).put(update_car).delete(delete_car),
        )
        .route("/api/reminders", get(get_reminders).post(create_reminder))
        .route(
            "/api/reminders/{id}",
            get(get_reminder)
                .put(update_reminder)
                .delete(delete_reminder),
        )
        .route("/api/reminders/by-car/{car_id}", get(get_reminders_by_car))
        .route("/api/reports", post(create_report))
        .route("/api/reports/search", get(search_reports))
        .route("/api/reports/by-car/{car_id}", get(get_reports_by_car))
        .route("/api/reports/{id}", get(get_report).delete(delete_report))
        .route("/api/notifications/ws", get(notifications_ws))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}
