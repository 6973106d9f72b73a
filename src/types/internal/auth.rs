use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use crate::types::db::principal;

/// Token claim set. This is the whole of the session: nothing is stored server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: String,

    pub identity_no: String,

    /// Present only on tokens issued through wallet authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[oai(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Unknown role strings are treated as no role
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The principal behind a request, loaded live from storage after token validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub id: String,
    pub identity_no: String,
    pub role: Option<Role>,
    pub wallet_address: Option<String>,
}

impl AuthenticatedPrincipal {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

impl From<&principal::Model> for AuthenticatedPrincipal {
    fn from(model: &principal::Model) -> Self {
        Self {
            id: model.id.clone(),
            identity_no: model.identity_no.clone(),
            role: model.role.as_deref().and_then(Role::parse),
            wallet_address: model.wallet_address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trips_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
    }

    #[test]
    fn test_role_parse_unknown_is_unset() {
        assert_eq!(Role::parse("ADMIN"), None);
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_claims_without_wallet_omit_the_field() {
        let claims = Claims {
            sub: "u1".to_string(),
            identity_no: "123456789".to_string(),
            wallet_address: None,
            iat: 0,
            exp: 3600,
        };

        let json = serde_json::to_string(&claims).unwrap();

        assert!(!json.contains("wallet_address"));
        let decoded: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, claims);
    }
}
