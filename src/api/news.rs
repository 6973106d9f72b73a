use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers::require_fields;
use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::RecordCoordinator;
use crate::errors::ApiError;
use crate::types::db::news;
use crate::types::dto::news::{
    CreateNewsApiResponse, CreateNewsRequest, NewsPage, NewsResponse,
    UpdateNewsRequest,
};
use crate::types::internal::{PageRequest, Role};

/// News article endpoints
pub struct NewsApi {
    coordinator: RecordCoordinator<news::Entity>,
    context: ContextBuilder,
}

impl NewsApi {
    pub fn new(app_data: Arc<AppData>, context: ContextBuilder) -> Self {
        Self {
            coordinator: RecordCoordinator::new(app_data, &[Role::Admin]),
            context,
        }
    }
}

#[derive(Tags)]
enum NewsTags {
    /// News articles
    News,
}

#[OpenApi(prefix_path = "/news")]
impl NewsApi {
    /// Create a news article
    #[oai(path = "/create", method = "post", tag = "NewsTags::News")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateNewsRequest>,
    ) -> Result<CreateNewsApiResponse, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        require_fields(&[
            ("code", body.code.as_str()),
            ("title", body.title.as_str()),
            ("content", body.content.as_str()),
        ])?;

        let created = self.coordinator.create(&ctx, body.0.into_active_model()).await?;
        Ok(CreateNewsApiResponse::Created(Json(created.into())))
    }

    /// Page of active articles, most recently updated first
    #[oai(path = "/getAll", method = "get", tag = "NewsTags::News")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<NewsPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let page = self.coordinator.list(&ctx, PageRequest::new(page.0, size.0)).await?;
        Ok(Json(page.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "NewsTags::News")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<NewsResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.coordinator.get(&ctx, &id.0).await?.into()))
    }

    /// Update an article at the version the caller last read
    #[oai(path = "/:id", method = "put", tag = "NewsTags::News")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateNewsRequest>,
    ) -> Result<Json<NewsResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let (version, patch) = body.0.into_patch();
        Ok(Json(self.coordinator.update(&ctx, &id.0, version, patch).await?.into()))
    }

    /// Soft-delete an article
    #[oai(path = "/:id", method = "delete", tag = "NewsTags::News")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<NewsResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.coordinator.delete(&ctx, &id.0, version.0).await?.into()))
    }
}
