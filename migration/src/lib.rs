pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_car_table;
mod m20260301_000002_create_app_user_table;
mod m20260301_000003_create_reminder_table;
mod m20260301_000004_create_reminder_dest_table;
mod m20260301_000005_create_report_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_car_table::Migration),
            Box::new(m20260301_000002_create_app_user_table::Migration),
            Box::new(m20260301_000003_create_reminder_table::Migration),
            Box::new(m20260301_000004_create_reminder_dest_table::Migration),
            Box::new(m20260301_000005_create_report_table::Migration),
        ]
    }
}
