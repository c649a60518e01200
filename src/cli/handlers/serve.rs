//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::{Settings, StorageBackend};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate and exit when `dry_run` is set, otherwise run the server
    /// until a shutdown signal arrives.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }
        Server::new(self.config).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.storage.backend {
            StorageBackend::Memory => println!("✓ Storage backend: memory (not persisted)"),
            StorageBackend::Postgres => println!(
                "✓ Storage backend: postgres (auto_migrate = {})",
                self.config.database.auto_migrate
            ),
        }
        println!("✓ Logger level: {}", self.config.logger.level);

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
