// Errors layer - Error type definitions
pub mod api;
pub mod internal;

pub use api::{ApiError, ErrorBody};
pub use internal::InternalError;
