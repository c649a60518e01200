//! Command executor for dispatching CLI commands
//!
//! Runs after argument parsing, configuration loading and logger setup.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Run the command `cli` names, `serve` when there is none.
///
/// # Errors
/// Returns errors from command handlers, including server startup failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command() {
        Commands::Serve { dry_run, .. } => {
            tracing::debug!(dry_run, "Executing serve command");
            ServeCommandHandler::new(settings).execute(dry_run).await
        }
        Commands::Migrate { dry_run, rollback } => {
            tracing::debug!(dry_run, ?rollback, "Executing migrate command");
            if rollback.is_some_and(|steps| steps > 50) {
                tracing::warn!(
                    steps = ?rollback,
                    "Rolling back this many migrations is a large operation"
                );
            }
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await?;
            Ok(())
        }
    }
}
