//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the service layer free of persistence details.

pub mod car;
pub mod reminder;
pub mod report;
pub mod user;
