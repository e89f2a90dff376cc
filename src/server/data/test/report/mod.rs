use crate::{
    model::report::{CrashDetailsDto, IssueDetailsDto, ReportDetailsDto},
    server::{
        data::report::ReportRepository,
        error::AppError,
        model::report::{CreateReportParams, ReportKind, SearchReportsParams},
    },
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use test_utils::{builder::TestBuilder, factory, factory::report::ReportFactory};


fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn crash_params(id: &str, plate: Option<&str>) -> CreateReportParams {
    CreateReportParams {
        id: id.to_string(),
        author: Some("driver-1".to_string()),
        created: now(),
        car_plate: plate.map(str::to_string),
        latitude: 9.93,
        longitude: -84.08,
        score: 4,
        details: ReportDetailsDto::Crash(CrashDetailsDto {
            date_of_crash: now() - Duration::hours(2),
            crash_details: Some("Rear bumper hit".to_string()),
            location: Some("Parking lot".to_string()),
            crashed_parts: Some("Bumper".to_string()),
        }),
    }
}
