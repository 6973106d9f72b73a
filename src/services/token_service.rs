use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::{TokenError, WalletError};
use crate::types::db::principal;
use crate::types::internal::Claims;

/// Issues and validates stateless HS256 bearer tokens.
///
/// Nothing about an issued token is stored: a token stays valid until it expires,
/// and logging out only means the client discards it.
pub struct TokenService {
    secret_manager: Arc<SecretManager>,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret_manager: Arc<SecretManager>, ttl_minutes: i64) -> Self {
        Self {
            secret_manager,
            ttl_minutes,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_minutes * 60
    }

    /// Token naming the principal's id and identity number
    pub fn issue(&self, principal: &principal::Model) -> Result<String, InternalError> {
        self.encode_claims(self.claims_for(principal, None))
    }

    /// Same as [`issue`](Self::issue), additionally carrying the linked wallet address
    pub fn issue_from_wallet(&self, principal: &principal::Model) -> Result<String, InternalError> {
        let wallet_address = principal.wallet_address.clone().ok_or_else(|| {
            WalletError::NoWalletLinked {
                principal_id: principal.id.clone(),
            }
        })?;

        self.encode_claims(self.claims_for(principal, Some(wallet_address)))
    }

    /// Verify signature, algorithm and expiry, and return the principal id
    pub fn validate(&self, token: &str) -> Result<Uuid, InternalError> {
        let claims = self.decode_claims(token)?;

        let principal_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| TokenError::malformed(format!("subject is not a UUID: {}", e)))?;

        Ok(principal_id)
    }

    /// Full claim set of a valid token
    pub fn decode_claims(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| {
            let err = TokenError::from(e);
            tracing::debug!("Token validation failed: {}", err);
            err
        })?;

        Ok(token_data.claims)
    }

    fn claims_for(&self, principal: &principal::Model, wallet_address: Option<String>) -> Claims {
        let now = Utc::now().timestamp();

        Claims {
            sub: principal.id.clone(),
            identity_no: principal.identity_no.clone(),
            wallet_address,
            iat: now,
            exp: now + self.ttl_seconds(),
        }
    }

    pub(crate) fn encode_claims(&self, claims: Claims) -> Result<String, InternalError> {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_encode", e.to_string()))
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret_manager", &self.secret_manager)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenService {{ ttl: {}min }}", self.ttl_minutes)
    }
}
