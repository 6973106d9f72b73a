use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub notification_type: String,
    pub target: String,
    pub target_user: Option<String>,
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

impl_versioned!("Notification", owner = creator_id);
