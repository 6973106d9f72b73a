// Database entities - SeaORM models

/// Wires an entity into the versioned mutation protocol.
///
/// Every versioned table names its bookkeeping columns identically; `owner`
/// names the model field that identifies who owns the row.
macro_rules! impl_versioned {
    ($record_name:expr, owner = $owner:ident) => {
        impl crate::types::db::versioned::VersionedEntity for Entity {
            const RECORD_NAME: &'static str = $record_name;

            fn id_column() -> Column {
                Column::Id
            }
            fn version_column() -> Column {
                Column::Version
            }
            fn active_column() -> Column {
                Column::Active
            }
            fn created_at_column() -> Column {
                Column::CreatedAt
            }
            fn updated_at_column() -> Column {
                Column::UpdatedAt
            }
            fn creator_column() -> Column {
                Column::CreatorId
            }
            fn modifier_column() -> Column {
                Column::ModifierId
            }
        }

        impl crate::types::db::versioned::VersionedModel for Model {
            fn id(&self) -> &str {
                &self.id
            }
            fn version(&self) -> i32 {
                self.version
            }
            fn is_active(&self) -> bool {
                self.active
            }
            fn owner_id(&self) -> &str {
                &self.$owner
            }
        }
    };
}

pub mod driver_license;
pub mod gov_agency;
pub mod news;
pub mod notification;
pub mod principal;
pub mod traffic_violation;
pub mod vehicle_registration;
pub mod versioned;

pub use versioned::{VersionedEntity, VersionedModel};
