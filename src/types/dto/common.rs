use chrono::DateTime;
use poem_openapi::Object;
use poem_openapi::types::{ParseFromJSON, ToJSON};
use sea_orm::ActiveValue::{self, NotSet, Set};
use sea_orm::Value;

use crate::types::internal::Page;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Plain acknowledgement
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Envelope returned by every paged list endpoint
#[derive(Object, Debug)]
pub struct PageResponse<T: ParseFromJSON + ToJSON> {
    pub total_count: u64,
    pub total_pages: u64,
    /// 1-based page number
    pub page: u64,
    pub size: u64,
    pub has_more: bool,
    pub items: Vec<T>,
}

impl<M, T> From<Page<M>> for PageResponse<T>
where
    T: From<M> + ParseFromJSON + ToJSON,
{
    fn from(page: Page<M>) -> Self {
        let has_more = page.has_more();
        let page = page.map(T::from);
        Self {
            total_count: page.total_count,
            total_pages: page.total_pages,
            page: page.page,
            size: page.size,
            has_more,
            items: page.items,
        }
    }
}

/// Render a stored unix timestamp as ISO 8601
pub fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Patch helper: absent or blank text leaves the column untouched
pub fn patch_text(value: Option<String>) -> ActiveValue<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Set(v.trim().to_string()),
        _ => NotSet,
    }
}

/// Patch helper for nullable text columns; blank input leaves the column untouched
pub fn patch_optional_text(value: Option<String>) -> ActiveValue<Option<String>> {
    match value {
        Some(v) if !v.trim().is_empty() => Set(Some(v.trim().to_string())),
        _ => NotSet,
    }
}

/// Patch helper for non-text columns
pub fn patch_value<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<Value>,
{
    match value {
        Some(v) => Set(v),
        None => NotSet,
    }
}
