//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::{JwtConfig, StorageBackend};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Database pool, present only on the postgres backend
    pub db_pool: Option<AsyncDbPool>,
    /// JWT configuration for token validation
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// State backed by a fresh process-local store.
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(Repositories::in_memory(), jwt_config.clone()),
            db_pool: None,
            jwt_config,
        }
    }

    /// State backed by PostgreSQL.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::with_pool(pool, settings.jwt.clone());
    /// ```
    pub fn with_pool(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(Repositories::postgres(pool.clone()), jwt_config.clone()),
            db_pool: Some(pool),
            jwt_config,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self.db_pool {
            Some(_) => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_state() {
        let state = AppState::in_memory(JwtConfig {
            secret: "state-test-secret-0123456789abcdef".to_string(),
            access_token_expiration: 1,
        });
        assert!(state.db_pool.is_none());
        assert_eq!(state.backend(), StorageBackend::Memory);
    }
}
