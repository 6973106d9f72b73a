// Coordinators layer - Workflow orchestration
//
// Coordinators compose token validation, policy evaluation and store calls for
// specific API endpoints. Every entry point takes the request's RequestContext.

pub mod auth_coordinator;
pub mod holder_coordinator;
pub mod record_coordinator;

pub use auth_coordinator::AuthCoordinator;
pub use holder_coordinator::HolderCoordinator;
pub use record_coordinator::RecordCoordinator;
