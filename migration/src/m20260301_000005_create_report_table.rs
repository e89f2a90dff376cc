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
                    .table(Report::Table)
                    .if_not_exists()
                    .col(string(Report::Id).primary_key())
                    .col(string(Report::Kind))
                    .col(string_null(Report::Author))
                    .col(timestamp_with_time_zone(Report::Created))
                    .col(string_null(Report::CarPlate))
                    .col(string_null(Report::CarPlateKey))
                    .col(double(Report::Latitude).default(0.0))
                    .col(double(Report::Longitude).default(0.0))
                    .col(integer(Report::Score).default(0))
                    .col(boolean(Report::Deleted).default(false))
                    .col(integer_null(Report::CarId))
                    .col(text(Report::Details))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_car_id")
                            .from(Report::Table, Report::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Report {
    Table,
    Id,
    Kind,
    Author,
    Created,
    CarPlate,
    CarPlateKey,
    Latitude,
    Longitude,
    Score,
    Deleted,
    CarId,
    Details,
}
