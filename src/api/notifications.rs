use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers::require_fields;
use crate::api::{BearerAuth, ContextBuilder};
use crate::coordinators::{HolderCoordinator, RecordCoordinator};
use crate::errors::ApiError;
use crate::types::db::notification;
use crate::types::dto::notification::{
    CreateNotificationApiResponse, CreateNotificationRequest, NotificationPage, NotificationResponse,
    UpdateNotificationRequest,
};
use crate::types::internal::{PageRequest, Role};

/// Notification endpoints
pub struct NotificationsApi {
    coordinator: RecordCoordinator<notification::Entity>,
    holder: HolderCoordinator,
    context: ContextBuilder,
}

impl NotificationsApi {
    pub fn new(app_data: Arc<AppData>, context: ContextBuilder) -> Self {
        Self {
            holder: HolderCoordinator::new(Arc::clone(&app_data)),
            coordinator: RecordCoordinator::new(app_data, &[Role::Admin]),
            context,
        }
    }
}

#[derive(Tags)]
enum NotificationTags {
    /// Notifications
    Notifications,
}

#[OpenApi(prefix_path = "/notifications")]
impl NotificationsApi {
    /// Publish a notification
    #[oai(path = "/create", method = "post", tag = "NotificationTags::Notifications")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateNotificationRequest>,
    ) -> Result<CreateNotificationApiResponse, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        require_fields(&[
            ("code", body.code.as_str()),
            ("title", body.title.as_str()),
            ("content", body.content.as_str()),
        ])?;

        let created = self.coordinator.create(&ctx, body.0.into_active_model()).await?;
        Ok(CreateNotificationApiResponse::Created(Json(created.into())))
    }

    /// Page of active notifications, most recently updated first
    #[oai(path = "/getAll", method = "get", tag = "NotificationTags::Notifications")]
    async fn list(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<NotificationPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let page = self.coordinator.list(&ctx, PageRequest::new(page.0, size.0)).await?;
        Ok(Json(page.into()))
    }

    /// Notifications whose title contains `q`
    #[oai(path = "/search", method = "get", tag = "NotificationTags::Notifications")]
    async fn search(
        &self,
        req: &Request,
        q: Query<String>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<NotificationPage>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        let request = PageRequest::new(page.0, size.0);
        let page = self.coordinator.search(&ctx, notification::Column::Title, &q.0, request).await?;
        Ok(Json(page.into()))
    }

    /// Broadcast notifications and those addressed to the caller
    #[oai(path = "/me", method = "get", tag = "NotificationTags::Notifications")]
    async fn mine(
        &self,
        req: &Request,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<NotificationPage>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let request = PageRequest::new(page.0, size.0);
        Ok(Json(self.holder.my_notifications(&ctx, request).await?.into()))
    }

    #[oai(path = "/me/:id", method = "get", tag = "NotificationTags::Notifications")]
    async fn mine_by_id(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<NotificationResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.holder.my_notification(&ctx, &id.0).await?.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "NotificationTags::Notifications")]
    async fn get(&self, req: &Request, id: Path<String>) -> Result<Json<NotificationResponse>, ApiError> {
        let ctx = self.context.anonymous(req).await?;
        Ok(Json(self.coordinator.get(&ctx, &id.0).await?.into()))
    }

    /// Update a notification at the version the caller last read
    #[oai(path = "/:id", method = "put", tag = "NotificationTags::Notifications")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateNotificationRequest>,
    ) -> Result<Json<NotificationResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        let (version, patch) = body.0.into_patch();
        Ok(Json(self.coordinator.update(&ctx, &id.0, version, patch).await?.into()))
    }

    /// Soft-delete a notification
    #[oai(path = "/:id", method = "delete", tag = "NotificationTags::Notifications")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        version: Query<i32>,
    ) -> Result<Json<NotificationResponse>, ApiError> {
        let ctx = self.context.authenticated(req, &auth).await?;
        Ok(Json(self.coordinator.delete(&ctx, &id.0, version.0).await?.into()))
    }
}
