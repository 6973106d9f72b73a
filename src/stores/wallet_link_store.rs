use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, SqlErr};

use crate::errors::InternalError;
use crate::errors::internal::WalletError;
use crate::types::db::principal::{Column, Entity};
use crate::types::internal::context::RequestContext;

/// Binding between an identity number and a wallet address
///
/// Linking is one conditional write guarded by `wallet_address IS NULL`; the unique
/// index on `wallet_address` decides races between two identities claiming one wallet.
pub struct WalletLinkStore {
    db: DatabaseConnection,
}

impl WalletLinkStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach `wallet_address` to the active principal with `identity_no`
    ///
    /// # Errors
    /// * `WalletError::AlreadyLinked` - another identity holds this wallet
    /// * `WalletError::IdentityNotLinkable` - no active principal, or it already has a wallet
    pub async fn link(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
        wallet_address: &str,
    ) -> Result<(), InternalError> {
        let stmt = Entity::update_many()
            .col_expr(Column::WalletAddress, Expr::value(wallet_address.to_string()))
            .col_expr(Column::Version, Expr::col(Column::Version).add(1))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .col_expr(Column::ModifierId, Expr::value(ctx.actor_id.clone()))
            .filter(Column::IdentityNo.eq(identity_no))
            .filter(Column::WalletAddress.is_null())
            .filter(Column::Active.eq(true));

        ctx.within_deadline("link_wallet", async {
            let result = stmt.exec(&self.db).await.map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => WalletError::AlreadyLinked {
                    wallet_address: wallet_address.to_string(),
                }
                .into(),
                _ => InternalError::database("link_wallet", e),
            })?;

            if result.rows_affected == 0 {
                return Err(WalletError::IdentityNotLinkable {
                    identity_no: identity_no.to_string(),
                }
                .into());
            }

            tracing::info!(
                request_id = %ctx.request_id,
                "Wallet linked to identity {} by {}",
                identity_no,
                ctx.actor_id
            );
            Ok(())
        })
        .await
    }

    /// Clear the wallet of the active principal with `identity_no`, linked or not
    pub async fn unlink(&self, ctx: &RequestContext, identity_no: &str) -> Result<(), InternalError> {
        let stmt = Entity::update_many()
            .col_expr(Column::WalletAddress, Expr::value(Option::<String>::None))
            .col_expr(Column::Version, Expr::col(Column::Version).add(1))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .col_expr(Column::ModifierId, Expr::value(ctx.actor_id.clone()))
            .filter(Column::IdentityNo.eq(identity_no))
            .filter(Column::Active.eq(true));

        ctx.within_deadline("unlink_wallet", async {
            let result = stmt
                .exec(&self.db)
                .await
                .map_err(|e| InternalError::database("unlink_wallet", e))?;

            if result.rows_affected == 0 {
                return Err(WalletError::IdentityNotFound {
                    identity_no: identity_no.to_string(),
                }
                .into());
            }

            tracing::info!(
                request_id = %ctx.request_id,
                "Wallet unlinked from identity {} by {}",
                identity_no,
                ctx.actor_id
            );
            Ok(())
        })
        .await
    }

    /// `(identity_no, display_name)` of the active principal holding `wallet_address`.
    /// The display name falls back to the identity number when no full name is set.
    pub async fn resolve_by_wallet(
        &self,
        ctx: &RequestContext,
        wallet_address: &str,
    ) -> Result<(String, String), InternalError> {
        ctx.within_deadline("resolve_wallet", async {
            let principal = Entity::find()
                .filter(Column::WalletAddress.eq(wallet_address))
                .filter(Column::Active.eq(true))
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database("resolve_wallet", e))?
                .ok_or_else(|| WalletError::WalletNotFound {
                    wallet_address: wallet_address.to_string(),
                })?;

            let display_name = principal
                .full_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| principal.identity_no.clone());
            Ok((principal.identity_no, display_name))
        })
        .await
    }

    /// False for unknown or inactive identity numbers
    pub async fn is_linked(&self, ctx: &RequestContext, identity_no: &str) -> Result<bool, InternalError> {
        ctx.within_deadline("check_wallet", async {
            let count = Entity::find()
                .filter(Column::IdentityNo.eq(identity_no))
                .filter(Column::WalletAddress.is_not_null())
                .filter(Column::Active.eq(true))
                .count(&self.db)
                .await
                .map_err(|e| InternalError::database("check_wallet", e))?;
            Ok(count > 0)
        })
        .await
    }
}
