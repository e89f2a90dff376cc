//! API data transfer objects shared by controllers, the realtime hub and OpenAPI docs.

pub mod api;
pub mod car;
pub mod notification;
pub mod reminder;
pub mod report;
