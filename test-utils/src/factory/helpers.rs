//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a pending reminder with a car and a single destination.
///
/// This is a convenience method that creates:
/// 1. Car
/// 2. User (with an email address)
/// 3. Reminder due now, owned by the car
/// 4. ReminderDest pointing at the user
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((car, user, reminder, dest))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_reminder_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::car::Model,
        entity::user::Model,
        entity::reminder::Model,
        entity::reminder_dest::Model,
    ),
    DbErr,
> {
    let car = crate::factory::car::create_car(db).await?;
    let user = crate::factory::user::create_user(db).await?;
    let reminder = crate::factory::reminder::create_reminder(db, car.id).await?;
    let dest = crate::factory::reminder::create_reminder_dest(db, reminder.id, &user.id).await?;

    Ok((car, user, reminder, dest))
}

/// Folds a plate the same way the server does before storing its lookup key.
pub(crate) fn fold_plate(plate: &str) -> String {
    plate.trim().to_lowercase()
}
