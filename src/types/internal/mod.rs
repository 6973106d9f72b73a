pub mod auth;
pub mod context;
pub mod page;

pub use auth::{AuthenticatedPrincipal, Claims, Role};
pub use page::{Page, PageRequest};
