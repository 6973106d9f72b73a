use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use tokio::time::Instant;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::AuthenticatedPrincipal;

use super::{request_id::RequestId, request_source::RequestSource};

/// Deadline applied to CLI and system operations
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Request context that flows through all layers
///
/// Carries the authenticated principal as a typed value (never looked up by key),
/// plus the deadline every storage call made on behalf of this request runs under.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Principal loaded after token validation; `None` for anonymous requests
    pub principal: Option<AuthenticatedPrincipal>,

    /// Storage work still pending at this instant is abandoned
    pub deadline: Instant,

    /// Actor recorded as creator or modifier of rows written by this request
    pub actor_id: String,
}

impl RequestContext {
    /// Anonymous API request with the given time budget
    pub fn for_api(ip_address: Option<IpAddr>, timeout: Duration) -> Self {
        Self {
            ip_address,
            request_id: RequestId::new(),
            source: RequestSource::API,
            principal: None,
            deadline: Instant::now() + timeout,
            actor_id: "anonymous".to_owned(),
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI,
            principal: None,
            deadline: Instant::now() + DEFAULT_OPERATION_TIMEOUT,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::System,
            principal: None,
            deadline: Instant::now() + DEFAULT_OPERATION_TIMEOUT,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Attach the authenticated principal; it becomes the actor for writes
    pub fn with_principal(mut self, principal: AuthenticatedPrincipal) -> Self {
        self.actor_id = principal.id.clone();
        self.principal = Some(principal);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now() + timeout;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// The authenticated principal, or `Unauthenticated` when policy code runs without one
    pub fn principal(&self) -> Result<&AuthenticatedPrincipal, AuthorizationError> {
        self.principal
            .as_ref()
            .ok_or(AuthorizationError::Unauthenticated)
    }

    /// Run a storage future under this request's deadline.
    ///
    /// When the deadline passes first the future is dropped, which cancels the pending query.
    pub async fn within_deadline<T, F>(&self, operation: &str, fut: F) -> Result<T, InternalError>
    where
        F: Future<Output = Result<T, InternalError>>,
    {
        match tokio::time::timeout_at(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    request_id = %self.request_id,
                    source = %self.source,
                    "Deadline exceeded during {}",
                    operation
                );
                Err(InternalError::deadline_exceeded(operation))
            }
        }
    }
}
