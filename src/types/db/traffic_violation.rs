use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "traffic_violations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub vehicle_no: String,
    pub date: String,
    pub violation_type: String,
    pub address: String,
    pub description: String,
    pub points: i32,
    pub fine_amount: i64,
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

impl_versioned!("Traffic violation", owner = creator_id);
