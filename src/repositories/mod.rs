//! Repository layer for data access operations.
//!
//! Services depend on the [`PodcastRepository`] and [`AccountRepository`]
//! traits. Two backends implement them: [`MemoryStore`] for process-local
//! storage and the diesel-async repositories for PostgreSQL. Every method is
//! a single atomic unit against its backend.

mod account_repo;
mod memory;
mod podcast_repo;

pub use account_repo::PgAccountRepository;
pub use memory::MemoryStore;
pub use podcast_repo::PgPodcastRepository;

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{
    Account, AccountChanges, Episode, EpisodeChanges, NewAccount, NewEpisode, NewPodcast,
    NewReview, Podcast, PodcastChanges, PodcastRecord, Review,
};

/// Storage for podcast aggregates.
#[async_trait]
pub trait PodcastRepository: Send + Sync + 'static {
    /// All podcasts with their episodes and reviews, in creation order.
    async fn list(&self) -> AppResult<Vec<Podcast>>;

    /// Podcasts whose title contains `title_query` (case-insensitive), plus the
    /// total number of matches ignoring `offset`/`limit`.
    async fn search_by_title(
        &self,
        title_query: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Podcast>, i64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Podcast>>;

    /// Look an episode up by its store-wide id.
    async fn find_episode(&self, episode_id: i32) -> AppResult<Option<Episode>>;

    async fn insert(&self, new_podcast: NewPodcast) -> AppResult<PodcastRecord>;

    /// Apply a non-empty patch. `None` when the podcast no longer exists.
    async fn update(&self, id: i32, changes: &PodcastChanges) -> AppResult<Option<PodcastRecord>>;

    /// Remove a podcast with everything hanging off it. `false` when absent.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Fails with `PodcastNotFound` when the parent disappeared.
    async fn insert_episode(&self, new_episode: NewEpisode) -> AppResult<Episode>;

    /// Apply a non-empty patch to an episode of `podcast_id`.
    async fn update_episode(
        &self,
        podcast_id: i32,
        episode_id: i32,
        changes: &EpisodeChanges,
    ) -> AppResult<Option<Episode>>;

    async fn delete_episode(&self, podcast_id: i32, episode_id: i32) -> AppResult<bool>;

    /// Fails with `PodcastNotFound` when the podcast disappeared.
    async fn insert_review(&self, new_review: NewReview) -> AppResult<Review>;
}

/// Storage for accounts and their subscription/playback links.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Fails with `EmailTaken` when the email is already registered.
    async fn insert(&self, new_account: NewAccount) -> AppResult<Account>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Apply a non-empty patch. Fails with `EmailTaken` on a duplicate email.
    async fn update(&self, id: i32, changes: &AccountChanges) -> AppResult<Option<Account>>;

    /// Flip the subscription and return whether the account is now subscribed.
    async fn toggle_subscription(&self, account_id: i32, podcast_id: i32) -> AppResult<bool>;

    async fn subscription_ids(&self, account_id: i32) -> AppResult<Vec<i32>>;

    /// Idempotent.
    async fn mark_played(&self, account_id: i32, episode_id: i32) -> AppResult<()>;

    async fn played_episode_ids(&self, account_id: i32) -> AppResult<Vec<i32>>;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub podcasts: Arc<dyn PodcastRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}

impl Repositories {
    /// Both repositories backed by one shared [`MemoryStore`].
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            podcasts: Arc::new(store.clone()),
            accounts: Arc::new(store),
        }
    }

    /// Both repositories backed by PostgreSQL.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            podcasts: Arc::new(PgPodcastRepository::new(pool.clone())),
            accounts: Arc::new(PgAccountRepository::new(pool)),
        }
    }
}
