// CLI module for the server process and administrative operations

pub mod admin;
pub mod migrate;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Driving registry CLI
#[derive(Parser, Debug)]
#[command(name = "driving-registry")]
#[command(about = "Driving registry backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create an admin principal
    CreateAdmin {
        /// Identity number of the new admin
        #[arg(long)]
        identity_no: String,

        /// Generated and printed once when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Execute an administrative command against initialized application data
pub async fn execute_command(
    command: Commands,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::CreateAdmin {
            identity_no,
            password,
        } => {
            admin::create_admin(app_data, &identity_no, password).await?;
        }
        Commands::Serve | Commands::Migrate => {}
    }

    Ok(())
}
