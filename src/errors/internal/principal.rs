use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrincipalError {
    #[error("Principal not found: {lookup}")]
    NotFound { lookup: String },

    /// Token verified, but the principal it names is gone or deactivated
    #[error("Account inactive: {principal_id}")]
    Inactive { principal_id: String },

    #[error("Identity number already registered: {identity_no}")]
    DuplicateIdentity { identity_no: String },

    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl PrincipalError {
    pub fn not_found(lookup: impl Into<String>) -> Self {
        Self::NotFound {
            lookup: lookup.into(),
        }
    }
}
