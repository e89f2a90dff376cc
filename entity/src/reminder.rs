use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reminder")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub reminder_date: DateTimeUtc,
    pub status: String,
    pub author: Option<String>,
    pub car_id: i32,
    pub broadcast_at: Option<DateTimeUtc>,
    pub sent_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Car,
    #[sea_orm(has_many = "super::reminder_dest::Entity")]
    ReminderDest,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::reminder_dest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReminderDest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
