use sea_orm::EntityTrait;

/// A table whose rows follow the versioned, soft-delete lifecycle:
/// created at version 1 and active, every mutation bumps `version` by exactly one,
/// and deletion flips `active` off instead of removing the row.
pub trait VersionedEntity: EntityTrait {
    /// Human-readable name used in error messages and logs
    const RECORD_NAME: &'static str;

    fn id_column() -> Self::Column;
    fn version_column() -> Self::Column;
    fn active_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn creator_column() -> Self::Column;
    fn modifier_column() -> Self::Column;
}

pub trait VersionedModel {
    fn id(&self) -> &str;
    fn version(&self) -> i32;
    fn is_active(&self) -> bool;
    /// Principal id the owner-or-admin policy compares against
    fn owner_id(&self) -> &str;
}
