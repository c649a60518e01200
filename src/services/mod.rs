//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod account_service;
mod podcast_service;

pub use account_service::AccountService;
pub use podcast_service::{PodcastService, SEARCH_PAGE_SIZE};

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Services {
    pub podcasts: PodcastService,
    pub accounts: AccountService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, jwt: JwtConfig) -> Self {
        let podcasts = PodcastService::new(repos.podcasts);
        let accounts = AccountService::new(repos.accounts, podcasts.clone(), jwt);
        Self { podcasts, accounts }
    }
}
