use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{AuthenticatedPrincipal, Role};

/// A route-level access rule, evaluated against the request's principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Principal's role must be one of these
    Role(Vec<Role>),
    /// Principal must be an admin or have this id
    OwnerOrAdmin(String),
}

/// Stateless policy evaluator.
///
/// A context without a principal yields `Unauthenticated` (401) rather than a
/// denial, so a handler that forgot to authenticate never looks like a refusal.
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    pub fn evaluate<'a>(
        ctx: &'a RequestContext,
        policy: &Policy,
    ) -> Result<&'a AuthenticatedPrincipal, InternalError> {
        let principal = ctx.principal()?;

        if Self::permits(principal, policy) {
            return Ok(principal);
        }

        tracing::debug!(
            request_id = %ctx.request_id,
            principal_id = %principal.id,
            "Policy {:?} denied",
            policy
        );

        let denial = match policy {
            Policy::OwnerOrAdmin(_) => AuthorizationError::NotOwnerOrAdmin {
                principal_id: principal.id.clone(),
            },
            Policy::Role(_) => AuthorizationError::RoleNotPermitted {
                role: principal
                    .role
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            },
        };

        Err(denial.into())
    }

    pub fn require_role<'a>(
        ctx: &'a RequestContext,
        allowed: &[Role],
    ) -> Result<&'a AuthenticatedPrincipal, InternalError> {
        Self::evaluate(ctx, &Policy::Role(allowed.to_vec()))
    }

    pub fn require_owner_or_admin<'a>(
        ctx: &'a RequestContext,
        owner_id: &str,
    ) -> Result<&'a AuthenticatedPrincipal, InternalError> {
        Self::evaluate(ctx, &Policy::OwnerOrAdmin(owner_id.to_string()))
    }

    fn permits(principal: &AuthenticatedPrincipal, policy: &Policy) -> bool {
        match policy {
            Policy::Role(allowed) => principal.role.is_some_and(|role| allowed.contains(&role)),
            Policy::OwnerOrAdmin(owner_id) => principal.is_admin() || principal.id == *owner_id,
        }
    }
}
