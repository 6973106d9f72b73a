use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub vehicle_no: String,
    pub owner_name: String,
    pub brand: String,
    pub type_vehicle: String,
    pub color_vehicle: String,
    pub chassis_no: String,
    pub engine_no: String,
    pub seats: Option<i32>,
    pub issue_date: String,
    pub issuer: String,
    pub status: String,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl_versioned!("Vehicle registration", owner = creator_id);
