use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_licenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub full_name: String,
    pub dob: String,
    pub identity_no: String,
    pub license_no: String,
    pub license_type: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub status: String,
    pub issuing_authority: String,
    pub nationality: String,
    /// Demerit balance, 0..=12
    pub point: i32,
    /// Wallet the license is bound to, when one has been attached
    pub wallet_address: Option<String>,
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

impl_versioned!("Driver license", owner = creator_id);
