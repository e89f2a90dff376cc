//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external transports
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod car;
pub mod notification;
pub mod reminder;
pub mod reminder_dispatch;
pub mod report;

#[cfg(test)]
mod test;
