use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, SecretManager, connect_database, migrate_database};
use crate::errors::InternalError;
use crate::services::{CredentialHasher, TokenService};
use crate::stores::{PrincipalStore, WalletLinkStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once at startup and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(settings)
///   ↓ creates once
///   ├─ db (DatabaseConnection, migrated)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ token_service (Arc<TokenService>)
///   ├─ hasher (Arc<CredentialHasher>)
///   ├─ principal_store (Arc<PrincipalStore>)
///   └─ wallet_link_store (Arc<WalletLinkStore>)
///   ↓ wrapped in Arc<AppData>
///   ├─ AuthCoordinator::new(app_data)
///   └─ RecordCoordinator::<E>::new(app_data, create_roles)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: BootstrapSettings,
    pub secret_manager: Arc<SecretManager>,
    pub token_service: Arc<TokenService>,
    pub hasher: Arc<CredentialHasher>,
    pub principal_store: Arc<PrincipalStore>,
    pub wallet_link_store: Arc<WalletLinkStore>,
}

impl AppData {
    /// Connect, migrate and wire every shared dependency
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when secrets are missing or the database is unreachable
    pub async fn init(settings: BootstrapSettings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Initializing secret manager...");
        let secret_manager = Arc::new(SecretManager::init().map_err(|e| {
            InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e))
        })?);

        let db = connect_database(&settings).await?;
        migrate_database(&db).await?;

        let app_data = Self::new(db, settings, secret_manager);
        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Wire dependencies around an existing, migrated connection
    pub fn new(
        db: DatabaseConnection,
        settings: BootstrapSettings,
        secret_manager: Arc<SecretManager>,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(
            Arc::clone(&secret_manager),
            settings.token_ttl_minutes(),
        ));
        let hasher = Arc::new(CredentialHasher::new(secret_manager.password_pepper()));

        tracing::debug!("Creating stores...");
        let principal_store = Arc::new(PrincipalStore::new(db.clone()));
        let wallet_link_store = Arc::new(WalletLinkStore::new(db.clone()));

        Self {
            db,
            settings,
            secret_manager,
            token_service,
            hasher,
            principal_store,
            wallet_link_store,
        }
    }
}
