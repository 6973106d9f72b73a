use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Connect to the registry database.
///
/// Does NOT run migrations; call [`migrate_database`] separately.
pub async fn connect_database(
    bootstrap_settings: &BootstrapSettings,
) -> Result<DatabaseConnection, InternalError> {
    let database_url = bootstrap_settings.database_url();

    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to registry database: {}", database_url);

    Ok(db)
}

/// Apply all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Registry database migrations completed");

    Ok(())
}
