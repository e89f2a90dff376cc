use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(pk_auto(Car::Id))
                    .col(string_null(Car::Brand))
                    .col(string(Car::Model))
                    .col(string_null(Car::Plate))
                    .col(string_null(Car::PlateKey))
                    .col(string_null(Car::CarType))
                    .col(string_null(Car::FuelType))
                    .col(string_null(Car::Vin))
                    .col(string_null(Car::Color))
                    .col(integer_null(Car::Year))
                    .col(text_null(Car::Notes))
                    .col(
                        timestamp_with_time_zone(Car::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_car_plate_key")
                    .table(Car::Table)
                    .col(Car::PlateKey)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Car {
    Table,
    Id,
    Brand,
    Model,
    Plate,
    PlateKey,
    CarType,
    FuelType,
    Vin,
    Color,
    Year,
    Notes,
    CreatedAt,
}
