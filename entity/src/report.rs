use sea_orm::entity::prelude::*;

/// Inspection report of any kind; kind-specific fields live in `details` as JSON.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub author: Option<String>,
    pub created: DateTimeUtc,
    pub car_plate: Option<String>,
    /// Trimmed, case-folded `car_plate`, maintained by the application.
    pub car_plate_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub score: i32,
    pub deleted: bool,
    pub car_id: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub details: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Car,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
