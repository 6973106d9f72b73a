use std::sync::Arc;

use sea_orm::ActiveValue::{NotSet, Set};

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::{AuthorizationError, PrincipalError, WalletError};
use crate::errors::internal::validation::require_non_empty;
use crate::services::{AuthorizationGuard, CredentialHasher, TokenService};
use crate::stores::{NewPrincipal, PrincipalStore, WalletLinkStore};
use crate::types::db::principal;
use crate::types::dto::auth::{
    ConnectWalletRequest, LinkWalletRequest, LoginRequest, PrincipalPage, PrincipalResponse,
    RegisterRequest, ResolvedWalletResponse, TokenResponse, UpdatePrincipalRequest,
    WalletStatusResponse,
};
use crate::types::dto::common::{MessageResponse, patch_optional_text};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{AuthenticatedPrincipal, PageRequest, Role};

/***
 * Principal lifecycle: token-based authentication, registration, login,
 * wallet linking and the owner-or-admin guarded principal mutations.
 */
pub struct AuthCoordinator {
    principal_store: Arc<PrincipalStore>,
    wallet_link_store: Arc<WalletLinkStore>,
    token_service: Arc<TokenService>,
    hasher: Arc<CredentialHasher>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            principal_store: Arc::clone(&app_data.principal_store),
            wallet_link_store: Arc::clone(&app_data.wallet_link_store),
            token_service: Arc::clone(&app_data.token_service),
            hasher: Arc::clone(&app_data.hasher),
        }
    }

    /// Validate a bearer token and attach the live principal to the context.
    ///
    /// The principal is reloaded on every request so deactivation and role
    /// changes take effect immediately. A valid token naming a missing or
    /// inactive principal is rejected as an inactive account.
    pub async fn authenticate(
        &self,
        ctx: RequestContext,
        token: &str,
    ) -> Result<RequestContext, InternalError> {
        let principal_id = self.token_service.validate(token)?.to_string();

        let principal = match self.principal_store.by_id(&ctx, &principal_id).await {
            Ok(principal) => principal,
            Err(InternalError::Principal(PrincipalError::NotFound { .. })) => {
                return Err(PrincipalError::Inactive { principal_id }.into());
            }
            Err(e) => return Err(e),
        };

        Ok(ctx.with_principal(AuthenticatedPrincipal::from(&principal)))
    }

    /// Self-registration; the new principal gets the `user` role and a token
    pub async fn register(
        &self,
        ctx: &RequestContext,
        request: RegisterRequest,
    ) -> Result<TokenResponse, InternalError> {
        require_non_empty("identity_no", &request.identity_no)?;

        let password_hash = self.hasher.hash_password(&request.password)?;
        let principal = self
            .principal_store
            .create(
                ctx,
                NewPrincipal {
                    identity_no: request.identity_no.trim().to_string(),
                    password_hash: Some(password_hash),
                    full_name: request.full_name.filter(|n| !n.trim().is_empty()),
                    role: Some(Role::User),
                },
            )
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            principal_id = %principal.id,
            "Principal registered"
        );

        let access_token = self.token_service.issue(&principal)?;
        Ok(self.token_response(access_token, principal))
    }

    /// Create an admin principal outside the HTTP surface
    pub async fn create_admin(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
        password: &str,
    ) -> Result<principal::Model, InternalError> {
        require_non_empty("identity_no", identity_no)?;

        let password_hash = self.hasher.hash_password(password)?;
        self.principal_store
            .create(
                ctx,
                NewPrincipal {
                    identity_no: identity_no.trim().to_string(),
                    password_hash: Some(password_hash),
                    full_name: None,
                    role: Some(Role::Admin),
                },
            )
            .await
    }

    /// Unknown identity, wallet-only account and wrong password are indistinguishable
    pub async fn login(
        &self,
        ctx: &RequestContext,
        request: LoginRequest,
    ) -> Result<TokenResponse, InternalError> {
        let principal = match self
            .principal_store
            .by_identity_number(ctx, request.identity_no.trim())
            .await
        {
            Ok(principal) => principal,
            Err(InternalError::Principal(PrincipalError::NotFound { .. })) => {
                return Err(PrincipalError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let verified = match principal.password_hash.as_deref() {
            Some(stored) => self.hasher.verify_password(stored, &request.password)?,
            None => false,
        };
        if !verified {
            tracing::debug!(request_id = %ctx.request_id, "Login rejected for {}", principal.id);
            return Err(PrincipalError::InvalidCredentials.into());
        }

        let access_token = self.token_service.issue(&principal)?;
        Ok(self.token_response(access_token, principal))
    }

    /// Token for the principal the wallet is linked to
    pub async fn connect_wallet(
        &self,
        ctx: &RequestContext,
        request: ConnectWalletRequest,
    ) -> Result<TokenResponse, InternalError> {
        let wallet_address = request.wallet_address.trim();
        require_non_empty("wallet_address", wallet_address)?;

        let principal = match self.principal_store.by_wallet_address(ctx, wallet_address).await {
            Ok(principal) => principal,
            Err(InternalError::Principal(PrincipalError::NotFound { .. })) => {
                return Err(WalletError::WalletNotFound {
                    wallet_address: wallet_address.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        let access_token = self.token_service.issue_from_wallet(&principal)?;
        Ok(self.token_response(access_token, principal))
    }

    /// Nothing is revoked server-side; the token stays valid until it expires
    pub fn logout(&self, ctx: &RequestContext) -> Result<MessageResponse, InternalError> {
        let principal = ctx.principal()?;
        tracing::info!(request_id = %ctx.request_id, principal_id = %principal.id, "Logout");
        Ok(MessageResponse {
            message: "Logged out; discard the token".to_string(),
        })
    }

    pub async fn me(&self, ctx: &RequestContext) -> Result<PrincipalResponse, InternalError> {
        let principal = ctx.principal()?;
        let model = self.principal_store.by_id(ctx, &principal.id).await?;
        Ok(model.into())
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<PrincipalResponse, InternalError> {
        Ok(self.principal_store.by_id(ctx, id).await?.into())
    }

    /// Active principal holding `identity_no`
    pub async fn find_by_identity(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
    ) -> Result<PrincipalResponse, InternalError> {
        let identity_no = identity_no.trim();
        require_non_empty("identity_no", identity_no)?;

        Ok(self.principal_store.by_identity_number(ctx, identity_no).await?.into())
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<PrincipalPage, InternalError> {
        AuthorizationGuard::require_role(ctx, &[Role::Admin])?;
        Ok(self.principal_store.list(ctx, request).await?.into())
    }

    /// Owner or admin may update; only an admin may change a role
    pub async fn update_principal(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: UpdatePrincipalRequest,
    ) -> Result<PrincipalResponse, InternalError> {
        let caller = AuthorizationGuard::require_owner_or_admin(ctx, id)?;

        if request.role.is_some() && !caller.is_admin() {
            return Err(AuthorizationError::RoleNotPermitted {
                role: caller.role.map(|r| r.to_string()).unwrap_or_else(|| "none".to_string()),
            }
            .into());
        }

        let password_hash = match request.password.as_deref() {
            Some(password) => Set(Some(self.hasher.hash_password(password)?)),
            None => NotSet,
        };

        let patch = principal::ActiveModel {
            full_name: patch_optional_text(request.full_name),
            password_hash,
            role: match request.role {
                Some(role) => Set(Some(role.as_str().to_string())),
                None => NotSet,
            },
            ..Default::default()
        };

        let updated = self
            .principal_store
            .update(ctx, id, request.version, patch)
            .await?;
        Ok(updated.into())
    }

    pub async fn delete_principal(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected_version: i32,
    ) -> Result<PrincipalResponse, InternalError> {
        AuthorizationGuard::require_owner_or_admin(ctx, id)?;

        let deleted = self
            .principal_store
            .soft_delete(ctx, id, expected_version)
            .await?;

        tracing::info!(request_id = %ctx.request_id, "Principal {} deactivated by {}", id, ctx.actor_id);
        Ok(deleted.into())
    }

    /// Owner or admin of the identity may link it to a wallet
    pub async fn link_wallet(
        &self,
        ctx: &RequestContext,
        request: LinkWalletRequest,
    ) -> Result<WalletStatusResponse, InternalError> {
        let identity_no = request.identity_no.trim();
        let wallet_address = request.wallet_address.trim();
        require_non_empty("identity_no", identity_no)?;
        require_non_empty("wallet_address", wallet_address)?;

        let owner = self.identity_owner(ctx, identity_no).await?.ok_or_else(|| {
            WalletError::IdentityNotLinkable {
                identity_no: identity_no.to_string(),
            }
        })?;
        AuthorizationGuard::require_owner_or_admin(ctx, &owner)?;

        self.wallet_link_store.link(ctx, identity_no, wallet_address).await?;
        Ok(WalletStatusResponse {
            identity_no: identity_no.to_string(),
            linked: true,
        })
    }

    pub async fn unlink_wallet(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
    ) -> Result<WalletStatusResponse, InternalError> {
        let identity_no = identity_no.trim();
        require_non_empty("identity_no", identity_no)?;

        let owner = self.identity_owner(ctx, identity_no).await?.ok_or_else(|| {
            WalletError::IdentityNotFound {
                identity_no: identity_no.to_string(),
            }
        })?;
        AuthorizationGuard::require_owner_or_admin(ctx, &owner)?;

        self.wallet_link_store.unlink(ctx, identity_no).await?;
        Ok(WalletStatusResponse {
            identity_no: identity_no.to_string(),
            linked: false,
        })
    }

    pub async fn check_wallet(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
    ) -> Result<WalletStatusResponse, InternalError> {
        let identity_no = identity_no.trim();
        require_non_empty("identity_no", identity_no)?;

        let linked = self.wallet_link_store.is_linked(ctx, identity_no).await?;
        Ok(WalletStatusResponse {
            identity_no: identity_no.to_string(),
            linked,
        })
    }

    pub async fn resolve_wallet(
        &self,
        ctx: &RequestContext,
        wallet_address: &str,
    ) -> Result<ResolvedWalletResponse, InternalError> {
        let wallet_address = wallet_address.trim();
        require_non_empty("wallet_address", wallet_address)?;

        let (identity_no, display_name) = self
            .wallet_link_store
            .resolve_by_wallet(ctx, wallet_address)
            .await?;
        Ok(ResolvedWalletResponse {
            identity_no,
            display_name,
        })
    }

    /// Id of the active principal holding `identity_no`, after checking the caller is authenticated
    async fn identity_owner(
        &self,
        ctx: &RequestContext,
        identity_no: &str,
    ) -> Result<Option<String>, InternalError> {
        ctx.principal()?;

        match self.principal_store.by_identity_number(ctx, identity_no).await {
            Ok(principal) => Ok(Some(principal.id)),
            Err(InternalError::Principal(PrincipalError::NotFound { .. })) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn token_response(&self, access_token: String, principal: principal::Model) -> TokenResponse {
        TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.ttl_seconds(),
            principal: principal.into(),
        }
    }
}
