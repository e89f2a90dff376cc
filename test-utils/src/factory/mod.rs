//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take care of foreign keys through the helpers
//! module, keeping tests concise.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let car = factory::car::create_car(&db).await?;
//!     let user = factory::user::create_user(&db).await?;
//!
//!     // Create a reminder with its car and one destination
//!     let (car, user, reminder, dest) =
//!         factory::helpers::create_reminder_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let car = factory::car::CarFactory::new(&db)
//!     .plate("ABC123")
//!     .brand(Some("Toyota".to_string()))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `car` - Create car entities
//! - `user` - Create user projection entities
//! - `reminder` - Create reminder and reminder destination entities
//! - `report` - Create inspection report entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod car;
pub mod helpers;
pub mod reminder;
pub mod report;
pub mod user;

pub use car::create_car;
pub use reminder::{create_reminder, create_reminder_dest};
pub use report::create_report;
pub use user::create_user;
