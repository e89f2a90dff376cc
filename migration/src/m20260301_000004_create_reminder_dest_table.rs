use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_reminder_table::Reminder;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReminderDest::Table)
                    .if_not_exists()
                    .col(pk_auto(ReminderDest::Id))
                    .col(integer(ReminderDest::ReminderId))
                    .col(string(ReminderDest::UserId))
                    .col(string(ReminderDest::Status).default("pending"))
                    .col(integer(ReminderDest::Attempts).default(0))
                    .col(text_null(ReminderDest::LastError))
                    .col(timestamp_with_time_zone_null(ReminderDest::DeliveredAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminder_dest_reminder_id")
                            .from(ReminderDest::Table, ReminderDest::ReminderId)
                            .to(Reminder::Table, Reminder::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReminderDest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReminderDest {
    Table,
    Id,
    ReminderId,
    UserId,
    Status,
    Attempts,
    LastError,
    DeliveredAt,
}
