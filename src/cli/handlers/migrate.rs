//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.
//! Migrations only apply to the postgres backend, but `migrate` runs against
//! `[database]` whatever `storage.backend` says so a database can be prepared
//! before switching over.

use crate::config::Settings;
use crate::db::{
    applied_migration_count, pending_migration_count, revert_migrations, run_pending_migrations,
};
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        if dry_run {
            return self.show_pending_migrations().await;
        }

        match rollback {
            Some(steps) => self.rollback_migrations(steps).await,
            None => self.run_migrations().await,
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let url = &self.config.database.url;
        let applied = applied_migration_count(url).await?;
        let pending = pending_migration_count(url).await?;
        tracing::debug!(applied, pending, "Migration status");

        println!("{} migration(s) already applied", applied);
        if pending == 0 {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s)", pending);
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(&self.config.database.url).await?;
        tracing::info!(applied = applied.len(), "Database migrations applied");

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {}", migration);
            }
            println!("Database migration completed successfully");
        }

        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        println!("Rolling back {} migration(s)...", steps);

        let reverted = revert_migrations(&self.config.database.url, steps).await?;
        tracing::info!(reverted, "Database migrations reverted");

        println!("✓ Rolled back {} migration(s)", reverted);
        println!("Migration rollback completed successfully");

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
