//! Database connection pool module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! plus the embedded schema migrations.

mod migrations;
mod pool;

pub use migrations::{
    MIGRATIONS, applied_migration_count, pending_migration_count, revert_migrations,
    run_pending_migrations,
};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
