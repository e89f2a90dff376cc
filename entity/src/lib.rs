//! SeaORM entity models for the fleet database.

pub mod car;
pub mod prelude;
pub mod reminder;
pub mod reminder_dest;
pub mod report;
pub mod user;
