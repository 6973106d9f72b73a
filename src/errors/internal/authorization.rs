use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Policy evaluated without an authenticated principal in the request context
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role {role} is not permitted to perform this action")]
    RoleNotPermitted { role: String },

    #[error("Principal {principal_id} is neither the owner nor an admin")]
    NotOwnerOrAdmin { principal_id: String },
}
