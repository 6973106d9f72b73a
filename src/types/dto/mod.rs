// Request/response models exposed through the OpenAPI surface
pub mod agency;
pub mod auth;
pub mod common;
pub mod license;
pub mod news;
pub mod notification;
pub mod vehicle;
pub mod violation;
