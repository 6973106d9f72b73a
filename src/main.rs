use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use driving_registry_backend::AppData;
use driving_registry_backend::api::build_routes;
use driving_registry_backend::cli::{self, Cli, Commands};
use driving_registry_backend::config::{BootstrapSettings, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    let settings = BootstrapSettings::from_env()?;

    match cli.command() {
        Commands::Migrate => cli::migrate::run_migrations(&settings).await?,
        Commands::Serve => serve(settings).await?,
        command => {
            let app_data = Arc::new(AppData::init(settings).await?);
            cli::execute_command(command, app_data).await?;
        }
    }

    Ok(())
}

async fn serve(settings: BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let address = settings.server_address();
    let port = settings.server_port();
    let app_data = Arc::new(AppData::init(settings).await?);

    let app = build_routes(app_data);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", port);
    tracing::info!("API endpoints available at http://localhost:{}/api", port);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
