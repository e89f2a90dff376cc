pub use super::car::Entity as Car;
pub use super::reminder::Entity as Reminder;
pub use super::reminder_dest::Entity as ReminderDest;
pub use super::report::Entity as Report;
pub use super::user::Entity as User;
