//! Podcast aggregate service.
//!
//! Every operation on a podcast or one of its children first resolves the
//! podcast through [`PodcastService::get_podcast`] and propagates its error
//! unchanged. Gated writes then check ownership, then validate the payload,
//! and only then touch storage.

use std::sync::Arc;

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    Actor, Episode, EpisodeChanges, NewEpisode, NewPodcast, NewReview, Podcast, PodcastChanges,
    PodcastSearchPage,
};
use crate::repositories::PodcastRepository;

/// Number of podcasts per search results page.
pub const SEARCH_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct PodcastService {
    repo: Arc<dyn PodcastRepository>,
}

/// Fails with `NotAuthorized` when an actor is supplied and does not own `podcast`.
fn ensure_owner(podcast: &Podcast, actor: Option<Actor>) -> AppResult<()> {
    match actor {
        Some(actor) if !podcast.is_owned_by(actor.account_id) => {
            tracing::debug!(
                podcast_id = podcast.id,
                account_id = actor.account_id,
                "Rejected write on podcast owned by another account"
            );
            Err(AppError::NotAuthorized)
        }
        _ => Ok(()),
    }
}

impl PodcastService {
    pub fn new(repo: Arc<dyn PodcastRepository>) -> Self {
        Self { repo }
    }

    /// All podcasts in creation order.
    pub async fn list_podcasts(&self) -> AppResult<Vec<Podcast>> {
        self.repo.list().await
    }

    /// Creates a podcast with rating 0 and no children, returning its id.
    pub async fn create_podcast(
        &self,
        title: String,
        category: String,
        creator_id: Option<i32>,
    ) -> AppResult<i32> {
        let record = self
            .repo
            .insert(NewPodcast {
                title,
                category,
                creator_id,
            })
            .await?;

        tracing::info!(podcast_id = record.id, creator_id = ?creator_id, "Podcast created");
        Ok(record.id)
    }

    /// Resolve a podcast or fail with `PodcastNotFound`.
    pub async fn get_podcast(&self, id: i32) -> AppResult<Podcast> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::PodcastNotFound { id })
    }

    pub async fn delete_podcast(&self, id: i32, actor: Option<Actor>) -> AppResult<()> {
        let podcast = self.get_podcast(id).await?;
        ensure_owner(&podcast, actor)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::PodcastNotFound { id });
        }

        tracing::info!(
            podcast_id = id,
            episodes = podcast.episodes.len(),
            "Podcast deleted"
        );
        Ok(())
    }

    /// Merge `changes` onto the podcast. An out-of-range rating or a blank field
/// rejects the whole patch.
    pub async fn update_podcast(
        &self,
        id: i32,
        changes: PodcastChanges,
        actor: Option<Actor>,
    ) -> AppResult<()> {
        let podcast = self.get_podcast(id).await?;
        ensure_owner(&podcast, actor)?;

        if changes.has_invalid_rating() {
            tracing::debug!(podcast_id = id, rating = ?changes.rating, "Rejected rating update");
            return Err(AppError::InvalidRating);
        }
        changes.validate()?;
        if changes.is_empty() {
            return Ok(());
        }

        self.repo
            .update(id, &changes)
            .await?
            .ok_or(AppError::PodcastNotFound { id })?;

        tracing::info!(podcast_id = id, "Podcast updated");
        Ok(())
    }

    /// Case-insensitive title search, `SEARCH_PAGE_SIZE` results per 1-based page.
    pub async fn search_podcasts(&self, title_query: &str, page: i64) -> AppResult<PodcastSearchPage> {
        if page < 1 {
            return Err(AppError::validation("page", "Page must be 1 or greater"));
        }

        let offset = (page - 1).saturating_mul(SEARCH_PAGE_SIZE);
        let (podcasts, total_count) = self
            .repo
            .search_by_title(title_query, offset, SEARCH_PAGE_SIZE)
            .await?;

        Ok(PodcastSearchPage {
            podcasts,
            total_count,
            total_pages: (total_count + SEARCH_PAGE_SIZE - 1) / SEARCH_PAGE_SIZE,
        })
    }

    pub async fn get_episodes(&self, podcast_id: i32) -> AppResult<Vec<Episode>> {
        Ok(self.get_podcast(podcast_id).await?.episodes)
    }

    /// Looks the episode up inside the resolved podcast only.
    pub async fn get_episode(&self, podcast_id: i32, episode_id: i32) -> AppResult<Episode> {
        let (_, episode) = self.resolve_episode(podcast_id, episode_id).await?;
        Ok(episode)
    }

    async fn resolve_episode(&self, podcast_id: i32, episode_id: i32) -> AppResult<(Podcast, Episode)> {
        let podcast = self.get_podcast(podcast_id).await?;
        let episode = podcast
            .episode(episode_id)
            .cloned()
            .ok_or(AppError::EpisodeNotFound {
                episode_id,
                podcast_id,
            })?;
        Ok((podcast, episode))
    }

    /// Resolve an episode by its store-wide id.
    pub async fn find_episode(&self, episode_id: i32) -> AppResult<Episode> {
        self.repo
            .find_episode(episode_id)
            .await?
            .ok_or(AppError::UnknownEpisode { episode_id })
    }

    pub async fn create_episode(
        &self,
        podcast_id: i32,
        title: String,
        category: String,
        actor: Option<Actor>,
    ) -> AppResult<i32> {
        let podcast = self.get_podcast(podcast_id).await?;
        ensure_owner(&podcast, actor)?;

        let new_episode = NewEpisode {
            podcast_id,
            title,
            category,
        };
        new_episode.validate()?;
        let episode = self.repo.insert_episode(new_episode).await?;

        tracing::info!(podcast_id, episode_id = episode.id, "Episode created");
        Ok(episode.id)
    }

    pub async fn update_episode(
        &self,
        podcast_id: i32,
        episode_id: i32,
        changes: EpisodeChanges,
        actor: Option<Actor>,
    ) -> AppResult<()> {
        let (podcast, _) = self.resolve_episode(podcast_id, episode_id).await?;
        ensure_owner(&podcast, actor)?;
        changes.validate()?;

        if changes.is_empty() {
            return Ok(());
        }

        self.repo
            .update_episode(podcast_id, episode_id, &changes)
            .await?
            .ok_or(AppError::EpisodeNotFound {
                episode_id,
                podcast_id,
            })?;

        tracing::info!(podcast_id, episode_id, "Episode updated");
        Ok(())
    }

    pub async fn delete_episode(
        &self,
        podcast_id: i32,
        episode_id: i32,
        actor: Option<Actor>,
    ) -> AppResult<()> {
        let (podcast, _) = self.resolve_episode(podcast_id, episode_id).await?;
        ensure_owner(&podcast, actor)?;

        if !self.repo.delete_episode(podcast_id, episode_id).await? {
            return Err(AppError::EpisodeNotFound {
                episode_id,
                podcast_id,
            });
        }

        tracing::info!(podcast_id, episode_id, "Episode deleted");
        Ok(())
    }

    /// Review attributed to `creator_id`, returning its id.
    pub async fn create_review(
        &self,
        creator_id: i32,
        podcast_id: i32,
        title: String,
        text: String,
    ) -> AppResult<i32> {
        self.get_podcast(podcast_id).await?;

        let new_review = NewReview {
            podcast_id,
            creator_id,
            title,
            text,
        };
        new_review.validate()?;
        let review = self.repo.insert_review(new_review).await?;

        tracing::info!(podcast_id, review_id = review.id, creator_id, "Review created");
        Ok(review.id)
    }
}
