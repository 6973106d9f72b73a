use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers::require_fields;
use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::{HolderCoordinator, RecordCoordinator};
use crate::errors::ApiError;
use crate::types::db::traffic_violation;
use crate::types::dto::violation::{
    CreateViolationApiResponse, CreateViolationRequest, ViolationPage, ViolationResponse,
    UpdateViolationRequest,
};
use crate::types::internal::{PageRequest, Role};

/// Traffic violation endpoints; only admins record violations
pub struct ViolationsApi {
    coordinator: RecordCoordinator<traffic_violation::Entity>,
    holder: HolderCoordinator,
    context: ContextBuilder,
}

impl ViolationsApi {
    pub fn new(app_data: Arc<AppData>, context: ContextBuilder) -> Self {
        Self {
            holder: HolderCoordinator::new(Arc::clone(&app_data)),
            coordinator: RecordCoordinator::new(app_data, &[Role::Admin]),
            context,
        }
    }
}

#[derive(Tags)]
enum ViolationTags {
    /// Traffic violations
    Violations,
}

#[OpenApi(prefix_path = "/violations")]
impl ViolationsApi {
    /// Record a traffic violation
    #[oai(path = "/create", method = "post", tag = "ViolationTags::Violations")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateViolationRequest>,
    ) -> Result<CreateViolationApiResponse, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        require_fields(&[
            ("vehicle_no", body.vehicle_no.as_str()),
            ("violation_type", body.violation_type.as_str()),
            ("address", body.address.as_str()),
        ])?;

        let created = self.coordinator.create(&ctx, body.0.into_active_model()).await?;
        Ok(CreateViolationApiResponse::Created(Json(created.into())))
    }

    /// Page of active violations, most recently updated first
    #[oai(path = "/getAll", method = "get", tag = "ViolationTags::Violations")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<ViolationPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let page = self.coordinator.list(&ctx, PageRequest::new(page.0, size.0)).await?;
        Ok(Json(page.into()))
    }

    /// Violations whose plate contains `q`
    #[oai(path = "/search", method = "get", tag = "ViolationTags::Violations")]
    async fn search(
        &self,
        req: &Request,
        q: Query<String>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<ViolationPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let request = PageRequest::new(page.0, size.0);
        let page = self.coordinator.search(&ctx, traffic_violation::Column::VehicleNo, &q.0, request).await?;
        Ok(Json(page.into()))
    }

    /// Violations against vehicles the caller holds
    #[oai(path = "/me", method = "get", tag = "ViolationTags::Violations")]
    async fn mine(
        &self,
        req: &Request,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<ViolationPage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.holder.my_violations(&ctx, request).await?.into()))
    }

    /// Violations against vehicles of the license holders bound to the caller's wallet
    #[oai(path = "/me/license", method = "get", tag = "ViolationTags::Violations")]
    async fn mine_by_license(
        &self,
        req: &Request,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<ViolationPage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.holder.violations_by_my_license(&ctx, request).await?.into()))
    }

    /// One violation against a vehicle the caller holds
    #[oai(path = "/me/:id", method = "get", tag = "ViolationTags::Violations")]
    async fn mine_by_id(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ViolationResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.holder.my_violation(&ctx, &id.0).await?.into()))
    }

    /// Violations of one vehicle the caller holds; `id` names the vehicle
    #[oai(path = "/me/:id/vehicle", method = "get", tag = "ViolationTags::Violations")]
    async fn mine_by_vehicle(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<ViolationPage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.holder.violations_by_my_vehicle(&ctx, &id.0, request).await?.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "ViolationTags::Violations")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<ViolationResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.coordinator.get(&ctx, &id.0).await?.into()))
    }

    /// Update a violation at the version the caller last read
    #[oai(path = "/:id", method = "put", tag = "ViolationTags::Violations")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateViolationRequest>,
    ) -> Result<Json<ViolationResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let (version, patch) = body.0.into_patch();
        Ok(Json(self.coordinator.update(&ctx, &id.0, version, patch).await?.into()))
    }

    /// Soft-delete a violation
    #[oai(path = "/:id", method = "delete", tag = "ViolationTags::Violations")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<ViolationResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.coordinator.delete(&ctx, &id.0, version.0).await?.into()))
    }
}
