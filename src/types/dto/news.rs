use poem_openapi::{ApiResponse, Object, payload::Json};
use sea_orm::ActiveValue::Set;

use crate::types::db::news;
use crate::types::dto::common::{PageResponse, format_timestamp, patch_text};

#[derive(Object, Debug)]
pub struct CreateNewsRequest {
    #[oai(validator(min_length = 1, max_length = 50))]
    pub code: String,
    #[oai(validator(min_length = 1, max_length = 200))]
    pub title: String,
    #[oai(validator(min_length = 1))]
    pub content: String,
    #[oai(validator(min_length = 1))]
    pub category: String,
    #[oai(validator(min_length = 1))]
    pub author: String,
    #[oai(validator(min_length = 1))]
    pub news_type: String,
    /// Defaults to "draft"
    pub status: Option<String>,
}

impl CreateNewsRequest {
    pub fn into_active_model(self) -> news::ActiveModel {
        news::ActiveModel {
            code: Set(self.code.trim().to_string()),
            title: Set(self.title),
            content: Set(self.content),
            category: Set(self.category),
            author: Set(self.author),
            news_type: Set(self.news_type),
            status: Set(self.status.unwrap_or_else(|| "draft".to_string())),
            view: Set(0),
            ..Default::default()
        }
    }
}

#[derive(Object, Debug)]
pub struct UpdateNewsRequest {
    pub version: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub news_type: Option<String>,
    pub status: Option<String>,
}

impl UpdateNewsRequest {
    pub fn into_patch(self) -> (i32, news::ActiveModel) {
        let patch = news::ActiveModel {
            title: patch_text(self.title),
            content: patch_text(self.content),
            category: patch_text(self.category),
            author: patch_text(self.author),
            news_type: patch_text(self.news_type),
            status: patch_text(self.status),
            ..Default::default()
        };
        (self.version, patch)
    }
}

#[derive(Object, Debug)]
pub struct NewsResponse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub news_type: String,
    pub status: String,
    pub view: i64,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<news::Model> for NewsResponse {
    fn from(model: news::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            title: model.title,
            content: model.content,
            category: model.category,
            author: model.author,
            news_type: model.news_type,
            status: model.status,
            view: model.view,
            version: model.version,
            active: model.active,
            creator_id: model.creator_id,
            modifier_id: model.modifier_id,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

pub type NewsPage = PageResponse<NewsResponse>;

#[derive(ApiResponse)]
pub enum CreateNewsApiResponse {
    /// Article created
    #[oai(status = 201)]
    Created(Json<NewsResponse>),
}
