// Services layer - token, credential and policy logic with no storage access
pub mod authorization_guard;
pub mod crypto;
pub mod token_service;

pub use authorization_guard::{AuthorizationGuard, Policy};
pub use crypto::CredentialHasher;
pub use token_service::TokenService;
