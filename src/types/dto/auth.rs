use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::types::db::principal;
use crate::types::dto::common::{PageResponse, format_timestamp};
use crate::types::internal::Role;

/// Request model for registering a principal with identity number and password
#[derive(Object, Debug)]
pub struct RegisterRequest {
    /// National identity number
    #[oai(validator(min_length = 1, max_length = 20))]
    pub identity_no: String,

    #[oai(validator(min_length = 6, max_length = 128))]
    pub password: String,

    pub full_name: Option<String>,
}

#[derive(Object, Debug)]
pub struct LoginRequest {
    #[oai(validator(min_length = 1, max_length = 20))]
    pub identity_no: String,

    #[oai(validator(min_length = 1))]
    pub password: String,
}

#[derive(Object, Debug)]
pub struct ConnectWalletRequest {
    #[oai(validator(min_length = 1, max_length = 128))]
    pub wallet_address: String,
}

#[derive(Object, Debug)]
pub struct LinkWalletRequest {
    #[oai(validator(min_length = 1, max_length = 20))]
    pub identity_no: String,

    #[oai(validator(min_length = 1, max_length = 128))]
    pub wallet_address: String,
}

/// Only provided fields are changed; `role` may only be changed by an admin
#[derive(Object, Debug)]
pub struct UpdatePrincipalRequest {
    /// Version the caller last read
    pub version: i32,

    pub full_name: Option<String>,

    #[oai(validator(min_length = 6, max_length = 128))]
    pub password: Option<String>,

    pub role: Option<Role>,
}

/// Principal as exposed over the API; never carries the password hash
#[derive(Object, Debug, Clone)]
pub struct PrincipalResponse {
    pub id: String,
    pub identity_no: String,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub wallet_address: Option<String>,
    pub version: i32,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<principal::Model> for PrincipalResponse {
    fn from(model: principal::Model) -> Self {
        Self {
            role: model.role.as_deref().and_then(Role::parse),
            id: model.id,
            identity_no: model.identity_no,
            full_name: model.full_name,
            wallet_address: model.wallet_address,
            version: model.version,
            active: model.active,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

/// A freshly issued bearer token and the principal it names
#[derive(Object, Debug)]
pub struct TokenResponse {
    pub access_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Seconds until the token expires
    pub expires_in: i64,

    pub principal: PrincipalResponse,
}

pub type PrincipalPage = PageResponse<PrincipalResponse>;

#[derive(Object, Debug)]
pub struct WalletStatusResponse {
    pub identity_no: String,
    pub linked: bool,
}

#[derive(Object, Debug)]
pub struct ResolvedWalletResponse {
    pub identity_no: String,
    /// Full name when set, otherwise the identity number
    pub display_name: String,
}

#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// Principal created, token issued
    #[oai(status = 201)]
    Created(Json<TokenResponse>),
}
