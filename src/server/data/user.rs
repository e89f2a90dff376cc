use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::collections::HashMap;

use crate::server::model::user::User;

/// Read-only access to the identity-provider user projection.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the given users in a single query, keyed by id.
    ///
    /// Unknown ids are simply absent from the returned map.
    ///
    /// # Arguments
    /// - `ids` - User ids to look up; duplicates are harmless
    ///
    /// # Returns
    /// - `Ok(HashMap<String, User>)` - Users found, keyed by id
    /// - `Err(DbErr)` - Database error
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<HashMap<String, User>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.iter().cloned()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), User::from_entity(user)))
            .collect();

        Ok(users)
    }
}
