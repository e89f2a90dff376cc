use crate::{
    model::report::{IssueDetailsDto, ReportDetailsDto},
    server::{
        data::report::ReportRepository,
        error::AppError,
        model::report::CreateReportParams,
        service::report::{conflict_on_duplicate, ReportService},
    },
};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory::car::CarFactory};

mod create;

fn issue_params(id: &str, plate: Option<&str>) -> CreateReportParams {
    CreateReportParams {
        id: id.to_string(),
        author: Some("driver-1".to_string()),
        created: Utc::now(),
        car_plate: plate.map(str::to_string),
        latitude: 9.93,
        longitude: -84.08,
        score: 3,
        details: ReportDetailsDto::Issue(IssueDetailsDto {
            details: Some("Check engine light".to_string()),
            priority: Some("high".to_string()),
            issue_type: Some("engine".to_string()),
            is_resolved: false,
        }),
    }
}
