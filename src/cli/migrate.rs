use crate::config::{BootstrapSettings, connect_database, migrate_database};

/// Run database migrations
///
/// Connects and applies all pending migrations without initializing AppData,
/// so it needs no secrets.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
