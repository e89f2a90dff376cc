use sea_orm::DatabaseConnection;

use crate::server::{
    data::{car::CarRepository, reminder::ReminderRepository},
    error::AppError,
    model::reminder::{CreateReminderParams, Reminder, UpdateReminderParams},
};

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Schedules a reminder for an existing car.
    ///
    /// # Returns
    /// - `Ok(Reminder)` - Created reminder with one pending destination per distinct recipient
    /// - `Err(AppError::NotFound)` - The car does not exist
    pub async fn create(&self, params: CreateReminderParams) -> Result<Reminder, AppError> {
        self.ensure_car_exists(params.car_id).await?;

        Ok(ReminderRepository::new(self.db).create(params).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Reminder>, AppError> {
        Ok(ReminderRepository::new(self.db).get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Reminder>, AppError> {
        Ok(ReminderRepository::new(self.db).get_by_id(id).await?)
    }

    /// Lists a car's reminders, newest due date first.
    pub async fn get_by_car(&self, car_id: i32) -> Result<Vec<Reminder>, AppError> {
        self.ensure_car_exists(car_id).await?;

        Ok(ReminderRepository::new(self.db).get_by_car(car_id).await?)
    }

    /// Replaces a reminder; a new due date reschedules it.
    ///
    /// # Returns
    /// - `Ok(Reminder)` - Updated reminder
    /// - `Err(AppError::NotFound)` - Reminder or car does not exist
    pub async fn update(&self, params: UpdateReminderParams) -> Result<Reminder, AppError> {
        self.ensure_car_exists(params.car_id).await?;

        ReminderRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ReminderRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Reminder not found".to_string()));
        }

        Ok(())
    }

    async fn ensure_car_exists(&self, car_id: i32) -> Result<(), AppError> {
        CarRepository::new(self.db)
            .get_by_id(car_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
    }
}
