// API-facing error types
pub mod api_error;

pub use api_error::{ApiError, ErrorBody};
