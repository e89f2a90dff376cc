//! HTTP request handlers.
//!
//! Controllers convert DTOs to domain parameters, call the service layer and turn
//! domain models back into DTOs. Every handler carries a `utoipa::path` annotation
//! collected by the router's OpenAPI document.

pub mod car;
pub mod notification;
pub mod reminder;
pub mod report;
