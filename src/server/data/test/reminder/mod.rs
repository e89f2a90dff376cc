use crate::server::{
    data::reminder::ReminderRepository,
    model::reminder::{
        CreateReminderParams, DeliveryStatus, DueWindow, ReminderStatus, UpdateReminderParams,
    },
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::reminder::ReminderFactory};

mod claim;
mod create;
mod delete;
mod mark;
mod update;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}
