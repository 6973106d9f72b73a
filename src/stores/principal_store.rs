use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::InternalError;
use crate::errors::internal::{PrincipalError, RecordError};
use crate::types::db::principal::{self, ActiveModel, Column, Entity};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Page, PageRequest, Role};

use super::VersionedStore;

/// Fields supplied when a principal is registered
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub identity_no: String,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
}

/// Repository for principals
///
/// Every lookup filters on `active = true`; an inactive principal is indistinguishable
/// from one that never existed. Mutations go through the shared versioned protocol.
pub struct PrincipalStore {
    db: DatabaseConnection,
    records: VersionedStore<Entity>,
}

impl PrincipalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            records: VersionedStore::new(db.clone()),
            db,
        }
    }

    /// Insert a version-1 active principal
    ///
    /// # Errors
    /// `PrincipalError::DuplicateIdentity` when the identity number is already taken
    pub async fn create(
        &self,
        ctx: &RequestContext,
        new_principal: NewPrincipal,
    ) -> Result<principal::Model, InternalError> {
        let identity_no = new_principal.identity_no.clone();
        let record = ActiveModel {
            identity_no: Set(new_principal.identity_no),
            password_hash: Set(new_principal.password_hash),
            wallet_address: Set(None),
            full_name: Set(new_principal.full_name),
            role: Set(new_principal.role.map(|r| r.as_str().to_string())),
            modifier_id: Set(None),
            ..Default::default()
        };

        match self.records.create(ctx, record).await {
            Err(InternalError::Record(RecordError::Duplicate { .. })) => {
                Err(PrincipalError::DuplicateIdentity { identity_no }.into())
            }
            other => other,
        }
    }

    pub async fn by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<principal::Model, InternalError> {
        self.find_active(ctx, "principal_by_id", Column::Id, id).await
    }

    pub async fn by_identity_number(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
    ) -> Result<principal::Model, InternalError> {
        self.find_active(ctx, "principal_by_identity_number", Column::IdentityNo, identity_no)
            .await
    }

    pub async fn by_wallet_address(
        &self,
        ctx: &RequestContext,
        wallet_address: &str,
    ) -> Result<principal::Model, InternalError> {
        self.find_active(ctx, "principal_by_wallet_address", Column::WalletAddress, wallet_address)
            .await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<principal::Model>, InternalError> {
        self.records.list(ctx, request).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected_version: i32,
        patch: ActiveModel,
    ) -> Result<principal::Model, InternalError> {
        self.records.update(ctx, id, expected_version, patch).await
    }

    pub async fn soft_delete(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected_version: i32,
    ) -> Result<principal::Model, InternalError> {
        self.records.soft_delete(ctx, id, expected_version).await
    }

    async fn find_active(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        column: Column,
        value: &str,
    ) -> Result<principal::Model, InternalError> {
        ctx.within_deadline(operation, async {
            Entity::find()
                .filter(column.eq(value))
                .filter(Column::Active.eq(true))
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database(operation, e))?
                .ok_or_else(|| InternalError::from(PrincipalError::not_found(value)))
        })
        .await
    }
}
