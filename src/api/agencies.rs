use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers::require_fields;
use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::RecordCoordinator;
use crate::errors::ApiError;
use crate::types::db::gov_agency;
use crate::types::dto::agency::{
    CreateAgencyApiResponse, CreateAgencyRequest, AgencyPage, AgencyResponse,
    UpdateAgencyRequest,
};
use crate::types::internal::{PageRequest, Role};

/// Government agency endpoints
pub struct AgenciesApi {
    coordinator: RecordCoordinator<gov_agency::Entity>,
    context: ContextBuilder,
}

impl AgenciesApi {
    pub fn new(app_data: Arc<AppData>, context: ContextBuilder) -> Self {
        Self {
            coordinator: RecordCoordinator::new(app_data, &[Role::Admin]),
            context,
        }
    }
}

#[derive(Tags)]
enum AgencyTags {
    /// Government agencies
    Agencies,
}

#[OpenApi(prefix_path = "/agencies")]
impl AgenciesApi {
    /// Register a government agency
    #[oai(path = "/create", method = "post", tag = "AgencyTags::Agencies")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateAgencyRequest>,
    ) -> Result<CreateAgencyApiResponse, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        require_fields(&[
            ("name", body.name.as_str()),
            ("address", body.address.as_str()),
            ("city", body.city.as_str()),
        ])?;

        let created = self.coordinator.create(&ctx, body.0.into_active_model()).await?;
        Ok(CreateAgencyApiResponse::Created(Json(created.into())))
    }

    /// Page of active agencies, most recently updated first
    #[oai(path = "/getAll", method = "get", tag = "AgencyTags::Agencies")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<AgencyPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let page = self.coordinator.list(&ctx, PageRequest::new(page.0, size.0)).await?;
        Ok(Json(page.into()))
    }

    /// Agencies whose name contains `q`
    #[oai(path = "/search", method = "get", tag = "AgencyTags::Agencies")]
    async fn search(
        &self,
        req: &Request,
        q: Query<String>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<AgencyPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let request = PageRequest::new(page.0, size.0);
        let page = self.coordinator.search(&ctx, gov_agency::Column::Name, &q.0, request).await?;
        Ok(Json(page.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "AgencyTags::Agencies")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<AgencyResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.coordinator.get(&ctx, &id.0).await?.into()))
    }

    /// Update an agency at the version the caller last read
    #[oai(path = "/:id", method = "put", tag = "AgencyTags::Agencies")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateAgencyRequest>,
    ) -> Result<Json<AgencyResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let (version, patch) = body.0.into_patch();
        Ok(Json(self.coordinator.update(&ctx, &id.0, version, patch).await?.into()))
    }

    /// Soft-delete an agency
    #[oai(path = "/:id", method = "delete", tag = "AgencyTags::Agencies")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<AgencyResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.coordinator.delete(&ctx, &id.0, version.0).await?.into()))
    }
}
