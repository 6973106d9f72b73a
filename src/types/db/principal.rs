use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "principals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub identity_no: String,
    /// Absent for wallet-only accounts
    pub password_hash: Option<String>,
    #[sea_orm(unique)]
    pub wallet_address: Option<String>,
    pub full_name: Option<String>,
    /// "admin", "user", or unset
    pub role: Option<String>,
    pub version: i32,
    pub active: bool,
    pub creator_id: Option<String>,
    pub modifier_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// A principal owns itself
impl_versioned!("Principal", owner = id);
