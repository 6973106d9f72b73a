use thiserror::Error;

pub mod authorization;
pub mod database;
pub mod principal;
pub mod record;
pub mod token;
pub mod validation;
pub mod wallet;

pub use authorization::AuthorizationError;
pub use database::DatabaseError;
pub use principal::PrincipalError;
pub use record::RecordError;
pub use token::TokenError;
pub use validation::ValidationError;
pub use wallet::WalletError;

/// Internal error type for store, service and coordinator operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors.
/// Not exposed via API - endpoints must convert through `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error("Deadline exceeded during {operation}")]
    DeadlineExceeded { operation: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Principal(#[from] PrincipalError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn deadline_exceeded(operation: &str) -> Self {
        Self::DeadlineExceeded {
            operation: operation.to_string(),
        }
    }
}
