use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers::require_fields;
use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::{HolderCoordinator, RecordCoordinator};
use crate::errors::ApiError;
use crate::types::db::driver_license;
use crate::types::dto::license::{
    CreateLicenseApiResponse, CreateLicenseRequest, LicensePage, LicenseResponse,
    UpdateLicenseRequest,
};
use crate::types::internal::{PageRequest, Role};

/// Driver license endpoints; only admins issue licenses
pub struct LicensesApi {
    coordinator: RecordCoordinator<driver_license::Entity>,
    holder: HolderCoordinator,
    context: ContextBuilder,
}

impl LicensesApi {
    pub fn new(app_data: Arc<AppData>, context: ContextBuilder) -> Self {
        Self {
            holder: HolderCoordinator::new(Arc::clone(&app_data)),
            coordinator: RecordCoordinator::new(app_data, &[Role::Admin]),
            context,
        }
    }
}

#[derive(Tags)]
enum LicenseTags {
    /// Driver licenses
    Licenses,
}

#[OpenApi(prefix_path = "/licenses")]
impl LicensesApi {
    /// Issue a driver license
    #[oai(path = "/create", method = "post", tag = "LicenseTags::Licenses")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateLicenseRequest>,
    ) -> Result<CreateLicenseApiResponse, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        require_fields(&[
            ("full_name", body.full_name.as_str()),
            ("identity_no", body.identity_no.as_str()),
            ("license_no", body.license_no.as_str()),
        ])?;

        let created = self.coordinator.create(&ctx, body.0.into_active_model()).await?;
        Ok(CreateLicenseApiResponse::Created(Json(created.into())))
    }

    /// Page of active licenses, most recently updated first
    #[oai(path = "/getAll", method = "get", tag = "LicenseTags::Licenses")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<LicensePage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let page = self.coordinator.list(&ctx, PageRequest::new(page.0, size.0)).await?;
        Ok(Json(page.into()))
    }

    /// Licenses whose number contains `q`
    #[oai(path = "/search", method = "get", tag = "LicenseTags::Licenses")]
    async fn search(
        &self,
        req: &Request,
        q: Query<String>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<LicensePage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let request = PageRequest::new(page.0, size.0);
        let page = self.coordinator.search(&ctx, driver_license::Column::LicenseNo, &q.0, request).await?;
        Ok(Json(page.into()))
    }

    /// Licenses issued to the caller's identity number or bound to its wallet
    #[oai(path = "/me", method = "get", tag = "LicenseTags::Licenses")]
    async fn mine(
        &self,
        req: &Request,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<LicensePage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.holder.my_licenses(&ctx, request).await?.into()))
    }

    /// License bound to a wallet address
    #[oai(path = "/blockchain/:address", method = "get", tag = "LicenseTags::Licenses")]
    async fn by_wallet(
        &self,
        req: &Request,
        address: Path<String>,
    ) -> Result<Json<LicenseResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.holder.license_by_wallet(&ctx, &address.0).await?.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "LicenseTags::Licenses")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<LicenseResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.coordinator.get(&ctx, &id.0).await?.into()))
    }

    /// Update a license at the version the caller last read
    #[oai(path = "/:id", method = "put", tag = "LicenseTags::Licenses")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateLicenseRequest>,
    ) -> Result<Json<LicenseResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let (version, patch) = body.0.into_patch();
        Ok(Json(self.coordinator.update(&ctx, &id.0, version, patch).await?.into()))
    }

    /// Soft-delete a license
    #[oai(path = "/:id", method = "delete", tag = "LicenseTags::Licenses")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<LicenseResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.coordinator.delete(&ctx, &id.0, version.0).await?.into()))
    }
}
