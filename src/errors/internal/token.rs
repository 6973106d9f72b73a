use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Bearer token validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not a structurally valid token, or claims that cannot be decoded
    #[error("Malformed token: {reason}")]
    Malformed { reason: String },

    /// Signature does not verify, or the header names a different algorithm
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,
}

impl TokenError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::malformed(err.to_string()),
        }
    }
}
