use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::dto::auth::{
    ConnectWalletRequest, LinkWalletRequest, LoginRequest, PrincipalPage, PrincipalResponse,
    RegisterApiResponse, RegisterRequest, ResolvedWalletResponse, TokenResponse,
    UpdatePrincipalRequest, WalletStatusResponse,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::PageRequest;

/// Authentication, principal and wallet-link endpoints
pub struct AuthApi {
    auth_coordinator: Arc<AuthCoordinator>,
    context: ContextBuilder,
}

impl AuthApi {
    pub fn new(auth_coordinator: Arc<AuthCoordinator>, context: ContextBuilder) -> Self {
        Self {
            auth_coordinator,
            context,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Registration, login and tokens
    Authentication,
    /// Principal management
    Principals,
    /// Identity to wallet binding
    Wallets,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register with identity number and password; returns a token
    #[oai(path = "/create", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        req: &Request,
        body: Json<RegisterRequest>,
    ) -> Result<RegisterApiResponse, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let token = self.auth_coordinator.register(&ctx, body.0).await?;
        Ok(RegisterApiResponse::Created(Json(token)))
    }

    /// Login with identity number and password
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<Json<TokenResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.auth_coordinator.login(&ctx, body.0).await?))
    }

    /// Token for the identity a wallet address is linked to
    #[oai(path = "/connect-wallet", method = "post", tag = "AuthTags::Authentication")]
    async fn connect_wallet(
        &self,
        req: &Request,
        body: Json<ConnectWalletRequest>,
    ) -> Result<Json<TokenResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.auth_coordinator.connect_wallet(&ctx, body.0).await?))
    }

    /// Logout; tokens are stateless, so the client simply discards it
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.auth_coordinator.logout(&ctx)?))
    }

    /// The principal the token belongs to
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, req: &Request, auth: BearerAuth) -> Result<Json<PrincipalResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.auth_coordinator.me(&ctx).await?))
    }

    /// List active principals (admin only)
    #[oai(path = "/getAll", method = "get", tag = "AuthTags::Principals")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<PrincipalPage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.auth_coordinator.list(&ctx, request).await?))
    }

    /// Active principal holding an identity number
    #[oai(path = "/find", method = "get", tag = "AuthTags::Principals")]
    async fn find(
        &self,
        req: &Request,
        identity_no: Query<String>,
    ) -> Result<Json<PrincipalResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.auth_coordinator.find_by_identity(&ctx, &identity_no.0).await?))
    }

    /// Whether an identity number has a linked wallet
    #[oai(path = "/check-wallet", method = "get", tag = "AuthTags::Wallets")]
    async fn check_wallet(
        &self,
        req: &Request,
        identity_no: Query<String>,
    ) -> Result<Json<WalletStatusResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.auth_coordinator.check_wallet(&ctx, &identity_no.0).await?))
    }

    /// Identity number and display name behind a wallet address
    #[oai(path = "/resolve-wallet", method = "get", tag = "AuthTags::Wallets")]
    async fn resolve_wallet(
        &self,
        req: &Request,
        wallet_address: Query<String>,
    ) -> Result<Json<ResolvedWalletResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.auth_coordinator.resolve_wallet(&ctx, &wallet_address.0).await?))
    }

    /// Link a wallet to an identity (owner of that identity or admin)
    #[oai(path = "/link-wallet", method = "post", tag = "AuthTags::Wallets")]
    async fn link_wallet(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<LinkWalletRequest>,
    ) -> Result<Json<WalletStatusResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.auth_coordinator.link_wallet(&ctx, body.0).await?))
    }

    /// Remove the wallet from an identity (owner of that identity or admin)
    #[oai(path = "/unlink-wallet", method = "post", tag = "AuthTags::Wallets")]
    async fn unlink_wallet(
        &self,
        req: &Request,
        auth: BearerAuth,
        identity_no: Query<String>,
    ) -> Result<Json<WalletStatusResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.auth_coordinator.unlink_wallet(&ctx, &identity_no.0).await?))
    }

    /// Get an active principal by id
    #[oai(path = "/:id", method = "get", tag = "AuthTags::Principals")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<PrincipalResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.auth_coordinator.get(&ctx, &id.0).await?))
    }

    /// Update a principal (owner or admin; role changes admin only)
    #[oai(path = "/:id", method = "put", tag = "AuthTags::Principals")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdatePrincipalRequest>,
    ) -> Result<Json<PrincipalResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.auth_coordinator.update_principal(&ctx, &id.0, body.0).await?))
    }

    /// Soft-delete a principal (owner or admin)
    #[oai(path = "/:id", method = "delete", tag = "AuthTags::Principals")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<PrincipalResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(
            self.auth_coordinator
                .delete_principal(&ctx, &id.0, version.0)
                .await?,
        ))
    }
}
