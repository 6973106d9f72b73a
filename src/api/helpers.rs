use std::net::IpAddr;
use std::time::Duration;

use poem::Request;
use poem_openapi::auth::Bearer;

use crate::coordinators::AuthCoordinator;
use crate::errors::internal::validation::require_non_empty;
use crate::errors::{ApiError, InternalError};
use crate::types::internal::context::RequestContext;

/// Client IP, preferring proxy headers over the socket address
pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
    // Check X-Forwarded-For header (proxy/load balancer)
    if let Some(forwarded) = req.header("X-Forwarded-For") {
        if let Some(ip) = forwarded.split(',').next() {
            if let Ok(ip) = ip.trim().parse() {
                return Some(ip);
            }
        }
    }

    // Check X-Real-IP header (nginx)
    if let Some(real_ip) = req.header("X-Real-IP") {
        if let Ok(ip) = real_ip.trim().parse() {
            return Some(ip);
        }
    }

    req.remote_addr().as_socket_addr().map(|addr| addr.ip())
}

/// Build the request context, authenticating the bearer token when one is supplied
///
/// An anonymous context is returned for `None`; public handlers pass `None` and
/// handlers behind a `BearerAuth` parameter always pass the token.
pub async fn create_request_context(
    req: &Request,
    bearer: Option<&Bearer>,
    auth_coordinator: &AuthCoordinator,
    timeout: Duration,
) -> Result<RequestContext, ApiError> {
    let ctx = RequestContext::for_api(extract_ip_address(req), timeout);

    tracing::debug!(
        request_id = %ctx.request_id,
        ip = ?ctx.ip_address,
        "{} {}",
        req.method(),
        req.uri().path()
    );

    match bearer {
        Some(bearer) => Ok(auth_coordinator.authenticate(ctx, &bearer.token).await?),
        None => Ok(ctx),
    }
}

/// Reject blank required fields before touching storage
pub fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ApiError> {
    for &(field, value) in fields {
        require_non_empty(field, value).map_err(InternalError::from)?;
    }
    Ok(())
}
