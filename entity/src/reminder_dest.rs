use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reminder_dest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reminder_id: i32,
    pub user_id: String,
    pub status: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub delivered_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reminder::Entity",
        from = "Column::ReminderId",
        to = "super::reminder::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Reminder,
}

impl Related<super::reminder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reminder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
