use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_car_table::Car;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminder::Table)
                    .if_not_exists()
                    .col(pk_auto(Reminder::Id))
                    .col(string_null(Reminder::Title))
                    .col(text_null(Reminder::Description))
                    .col(string_null(Reminder::Email))
                    .col(timestamp_with_time_zone(Reminder::ReminderDate))
                    .col(string(Reminder::Status).default("pending"))
                    .col(string_null(Reminder::Author))
                    .col(integer(Reminder::CarId))
                    .col(timestamp_with_time_zone_null(Reminder::BroadcastAt))
                    .col(timestamp_with_time_zone_null(Reminder::SentAt))
                    .col(
                        timestamp_with_time_zone(Reminder::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminder_car_id")
                            .from(Reminder::Table, Reminder::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dispatch selects by (status, reminder_date) on every poll.
        manager
            .create_index(
                Index::create()
                    .name("idx_reminder_status_date")
                    .table(Reminder::Table)
                    .col(Reminder::Status)
                    .col(Reminder::ReminderDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reminder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reminder {
    Table,
    Id,
    Title,
    Description,
    Email,
    ReminderDate,
    Status,
    Author,
    CarId,
    BroadcastAt,
    SentAt,
    CreatedAt,
}
