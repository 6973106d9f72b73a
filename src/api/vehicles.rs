use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers::require_fields;
use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::{HolderCoordinator, RecordCoordinator};
use crate::errors::ApiError;
use crate::types::db::vehicle_registration;
use crate::types::dto::vehicle::{
    CreateVehicleApiResponse, CreateVehicleRequest, VehiclePage, VehicleResponse,
    UpdateVehicleRequest,
};
use crate::types::internal::{PageRequest, Role};

/// Vehicle registration endpoints; any authenticated principal may register a vehicle
pub struct VehiclesApi {
    coordinator: RecordCoordinator<vehicle_registration::Entity>,
    holder: HolderCoordinator,
    context: ContextBuilder,
}

impl VehiclesApi {
    pub fn new(app_data: Arc<AppData>, context: ContextBuilder) -> Self {
        Self {
            holder: HolderCoordinator::new(Arc::clone(&app_data)),
            coordinator: RecordCoordinator::new(app_data, &[Role::Admin, Role::User]),
            context,
        }
    }
}

#[derive(Tags)]
enum VehicleTags {
    /// Vehicle registrations
    Vehicles,
}

#[OpenApi(prefix_path = "/vehicles")]
impl VehiclesApi {
    /// Register a vehicle
    #[oai(path = "/create", method = "post", tag = "VehicleTags::Vehicles")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateVehicleRequest>,
    ) -> Result<CreateVehicleApiResponse, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        require_fields(&[
            ("vehicle_no", body.vehicle_no.as_str()),
            ("owner_name", body.owner_name.as_str()),
            ("chassis_no", body.chassis_no.as_str()),
            ("engine_no", body.engine_no.as_str()),
        ])?;

        let created = self.coordinator.create(&ctx, body.0.into_active_model()).await?;
        Ok(CreateVehicleApiResponse::Created(Json(created.into())))
    }

    /// Page of active registrations, most recently updated first
    #[oai(path = "/getAll", method = "get", tag = "VehicleTags::Vehicles")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<VehiclePage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let page = self.coordinator.list(&ctx, PageRequest::new(page.0, size.0)).await?;
        Ok(Json(page.into()))
    }

    /// Vehicles whose plate contains `q`
    #[oai(path = "/search", method = "get", tag = "VehicleTags::Vehicles")]
    async fn search(
        &self,
        req: &Request,
        q: Query<String>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<VehiclePage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let request = PageRequest::new(page.0, size.0);
        let page = self.coordinator.search(&ctx, vehicle_registration::Column::VehicleNo, &q.0, request).await?;
        Ok(Json(page.into()))
    }

    /// Vehicles held by the caller
    #[oai(path = "/me", method = "get", tag = "VehicleTags::Vehicles")]
    async fn mine(
        &self,
        req: &Request,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<VehiclePage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.holder.my_vehicles(&ctx, request).await?.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "VehicleTags::Vehicles")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<VehicleResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.coordinator.get(&ctx, &id.0).await?.into()))
    }

    /// Update a registration at the version the caller last read
    #[oai(path = "/:id", method = "put", tag = "VehicleTags::Vehicles")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateVehicleRequest>,
    ) -> Result<Json<VehicleResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let (version, patch) = body.0.into_patch();
        Ok(Json(self.coordinator.update(&ctx, &id.0, version, patch).await?.into()))
    }

    /// Soft-delete a registration
    #[oai(path = "/:id", method = "delete", tag = "VehicleTags::Vehicles")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<VehicleResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.coordinator.delete(&ctx, &id.0, version.0).await?.into()))
    }
}
