//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod analysis;
mod auth;
mod project;

pub use analysis::AnalysisCommands;
pub use auth::AuthCommands;
pub use project::ProjectCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::context::connect;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Account and session management
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Project management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Code analysis
    Analysis {
        #[command(subcommand)]
        command: AnalysisCommands,
    },
    /// Check that the backend is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Auth { command } => auth::handle_auth_command(command, config).await,
        Commands::Project { command } => project::handle_project_command(command, config).await,
        Commands::Analysis { command } => {
            analysis::handle_analysis_command(command, config).await
        }
        Commands::Health => health(config).await,
    }
}

/// Ping the backend's health endpoint
async fn health(config: &Config) -> Result<()> {
    let client = connect(config)?;
    let status = client.health().await?;

    if status.is_healthy() {
        println!("{} {}", "✓".green(), "Backend is healthy".bold());
    } else {
        println!("{} Backend reports: {}", "✗".red(), status.status.yellow());
    }

    Ok(())
}
