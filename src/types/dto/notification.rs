use poem_openapi::{ApiResponse, Object, payload::Json};
use sea_orm::ActiveValue::Set;

use crate::types::db::notification;
use crate::types::dto::common::{
    PageResponse, format_timestamp, patch_optional_text, patch_text,
};

#[derive(Object, Debug)]
pub struct CreateNotificationRequest {
    #[oai(validator(min_length = 1, max_length = 50))]
    pub code: String,
    #[oai(validator(min_length = 1, max_length = 200))]
    pub title: String,
    #[oai(validator(min_length = 1))]
    pub content: String,
    #[oai(validator(min_length = 1))]
    pub notification_type: String,
    /// Audience, e.g. "all" or "user"
    #[oai(validator(min_length = 1))]
    pub target: String,
    /// Identity number of the addressed user when `target` is a single user
    pub target_user: Option<String>,
    /// Defaults to "active"
    pub status: Option<String>,
}

impl CreateNotificationRequest {
    pub fn into_active_model(self) -> notification::ActiveModel {
        notification::ActiveModel {
            code: Set(self.code.trim().to_string()),
            title: Set(self.title),
            content: Set(self.content),
            notification_type: Set(self.notification_type),
            target: Set(self.target),
            target_user: Set(self.target_user.filter(|t| !t.trim().is_empty())),
            status: Set(self.status.unwrap_or_else(|| "active".to_string())),
            ..Default::default()
        }
    }
}

#[derive(Object, Debug)]
pub struct UpdateNotificationRequest {
    pub version: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub notification_type: Option<String>,
    pub target: Option<String>,
    pub target_user: Option<String>,
    pub status: Option<String>,
}

impl UpdateNotificationRequest {
    pub fn into_patch(self) -> (i32, notification::ActiveModel) {
        let patch = notification::ActiveModel {
            title: patch_text(self.title),
            content: patch_text(self.content),
            notification_type: patch_text(self.notification_type),
            target: patch_text(self.target),
            target_user: patch_optional_text(self.target_user),
            status: patch_text(self.status),
            ..Default::default()
        };
        (self.version, patch)
    }
}

#[derive(Object, Debug)]
pub struct NotificationResponse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub content: String,
    pub notification_type: String,
    pub target: String,
    pub target_user: Option<String>,
    pub status: String,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<notification::Model> for NotificationResponse {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            title: model.title,
            content: model.content,
            notification_type: model.notification_type,
            target: model.target,
            target_user: model.target_user,
            status: model.status,
            version: model.version,
            active: model.active,
            creator_id: model.creator_id,
            modifier_id: model.modifier_id,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

pub type NotificationPage = PageResponse<NotificationResponse>;

#[derive(ApiResponse)]
pub enum CreateNotificationApiResponse {
    /// Notification created
    #[oai(status = 201)]
    Created(Json<NotificationResponse>),
}
