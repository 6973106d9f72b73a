// Stores layer - Data access; every storage call runs under the request deadline
pub mod principal_store;
pub mod versioned_store;
pub mod wallet_link_store;

pub use principal_store::{NewPrincipal, PrincipalStore};
pub use versioned_store::VersionedStore;
pub use wallet_link_store::WalletLinkStore;
