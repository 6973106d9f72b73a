use std::fmt;

use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::errors::internal::{
    AuthorizationError, InternalError, PrincipalError, RecordError, TokenError, WalletError,
};

/// Error body returned by every endpoint
#[derive(Object, Debug, Clone)]
pub struct ErrorBody {
    /// HTTP status code
    pub status: u16,

    /// Human-readable error message
    pub message: String,
}

#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "bad_request_from_parse_error")]
pub enum ApiError {
    /// Malformed or incomplete request
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// Missing, invalid or expired token, or inactive account
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Authenticated but not permitted
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Absent or soft-deleted
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Request deadline expired before storage answered
    #[oai(status = 408)]
    RequestTimeout(Json<ErrorBody>),

    /// Stale version or uniqueness violation
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

fn bad_request_from_parse_error(err: poem::Error) -> ApiError {
    // Security scheme extraction failures arrive here too
    if err.status() == poem::http::StatusCode::UNAUTHORIZED {
        return ApiError::unauthorized("Authentication required");
    }
    ApiError::bad_request(err.to_string())
}

fn body(status: u16, message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        status,
        message: message.into(),
    })
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(body(400, message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(body(401, message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(body(403, message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body(404, message))
    }

    pub fn request_timeout() -> Self {
        ApiError::RequestTimeout(body(408, "Request deadline exceeded"))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body(409, message))
    }

    /// Always generic; details stay in the logs
    fn internal_server_error() -> Self {
        ApiError::InternalError(body(500, "An internal error occurred"))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the single conversion point from internal errors to HTTP errors.
    /// Expected client failures are logged at debug, infrastructure failures at error.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(_) | InternalError::Parse { .. } | InternalError::Crypto { .. } => {
                tracing::error!("Infrastructure error: {}", err);
                Self::internal_server_error()
            }
            InternalError::DeadlineExceeded { operation } => {
                tracing::warn!("Request deadline exceeded during {}", operation);
                Self::request_timeout()
            }

            InternalError::Token(token_err) => {
                tracing::debug!("Token rejected: {}", token_err);
                match token_err {
                    TokenError::Malformed { .. } => Self::unauthorized("Invalid or malformed token"),
                    TokenError::InvalidSignature => Self::unauthorized("Invalid token signature"),
                    TokenError::Expired => Self::unauthorized("Token has expired"),
                }
            }

            InternalError::Principal(principal_err) => match principal_err {
                PrincipalError::Inactive { principal_id } => {
                    tracing::info!("Token presented for inactive principal {}", principal_id);
                    Self::unauthorized("Account inactive")
                }
                PrincipalError::InvalidCredentials => {
                    tracing::debug!("Invalid credentials attempt");
                    Self::unauthorized("Invalid identity number or password")
                }
                PrincipalError::NotFound { lookup } => {
                    tracing::debug!("Principal lookup failed: {}", lookup);
                    Self::not_found("Principal not found")
                }
                PrincipalError::DuplicateIdentity { identity_no } => {
                    tracing::warn!("Duplicate identity registration attempt: {}", identity_no);
                    Self::conflict("Identity number already registered")
                }
            },

            InternalError::Record(record_err) => {
                tracing::debug!("Record operation rejected: {}", record_err);
                match record_err {
                    RecordError::NotFound { record, .. } => {
                        Self::not_found(format!("{} not found", record))
                    }
                    RecordError::Conflict { record, .. } => Self::conflict(format!(
                        "{} was modified by another request; fetch the latest version and retry",
                        record
                    )),
                    RecordError::Duplicate { record } => {
                        Self::conflict(format!("{} already exists", record))
                    }
                }
            }

            InternalError::Wallet(wallet_err) => match wallet_err {
                WalletError::AlreadyLinked { .. } => {
                    tracing::warn!("Wallet link conflict: {}", wallet_err);
                    Self::conflict("Wallet address is already linked")
                }
                WalletError::IdentityNotLinkable { .. } => {
                    tracing::debug!("{}", wallet_err);
                    Self::not_found("No active identity without a linked wallet")
                }
                WalletError::IdentityNotFound { .. } => {
                    tracing::debug!("{}", wallet_err);
                    Self::not_found("Identity not found")
                }
                WalletError::WalletNotFound { .. } => {
                    tracing::debug!("{}", wallet_err);
                    Self::not_found("Wallet address is not linked")
                }
                WalletError::NoWalletLinked { .. } => {
                    tracing::error!("Wallet token requested without a wallet: {}", wallet_err);
                    Self::internal_server_error()
                }
            },

            InternalError::Authorization(auth_err) => match auth_err {
                AuthorizationError::Unauthenticated => {
                    tracing::error!("Authorization evaluated without an authenticated principal");
                    Self::unauthorized("Authentication required")
                }
                AuthorizationError::RoleNotPermitted { .. }
                | AuthorizationError::NotOwnerOrAdmin { .. } => {
                    tracing::debug!("Access denied: {}", auth_err);
                    Self::forbidden("Insufficient permissions")
                }
            },

            InternalError::Validation(validation_err) => {
                tracing::debug!("Validation failed: {}", validation_err);
                Self::bad_request(validation_err.to_string())
            }
        }
    }

    fn body(&self) -> &ErrorBody {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::RequestTimeout(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }

    pub fn status(&self) -> u16 {
        self.body().status
    }

    pub fn message(&self) -> &str {
        &self.body().message
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status(), self.message())
    }
}
