//! Process-local storage backend.
//!
//! All entity kinds live behind one `RwLock` so cascades across podcasts,
//! episodes, reviews and account links happen under a single write guard.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{
    Account, AccountChanges, Episode, EpisodeChanges, NewAccount, NewEpisode, NewPodcast,
    NewReview, Podcast, PodcastChanges, PodcastRecord, Review,
};
use crate::repositories::{AccountRepository, PodcastRepository};

#[derive(Default)]
struct State {
    podcasts: BTreeMap<i32, PodcastRecord>,
    episodes: BTreeMap<i32, Episode>,
    reviews: BTreeMap<i32, Review>,
    accounts: BTreeMap<i32, Account>,
    /// (account_id, podcast_id)
    subscriptions: BTreeSet<(i32, i32)>,
    /// (account_id, episode_id)
    played: BTreeSet<(i32, i32)>,
    last_podcast_id: i32,
    last_episode_id: i32,
    last_review_id: i32,
    last_account_id: i32,
}

impl State {
    fn assemble(&self, record: &PodcastRecord) -> Podcast {
        let episodes = self
            .episodes
            .values()
            .filter(|e| e.podcast_id == record.id)
            .cloned()
            .collect();
        let reviews = self
            .reviews
            .values()
            .filter(|r| r.podcast_id == record.id)
            .cloned()
            .collect();
        Podcast::from_parts(record.clone(), episodes, reviews)
    }

    fn email_in_use(&self, email: &str, except: Option<i32>) -> bool {
        self.accounts
            .values()
            .any(|a| a.email == email && Some(a.id) != except)
    }
}

/// In-memory implementation of both repository traits.
///
/// Ids come from per-kind counters and are never reused, so `BTreeMap`
/// iteration order is creation order. Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PodcastRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Podcast>> {
        let state = self.state.read().await;
        Ok(state.podcasts.values().map(|p| state.assemble(p)).collect())
    }

    async fn search_by_title(
        &self,
        title_query: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Podcast>, i64)> {
        let state = self.state.read().await;
        let needle = title_query.to_lowercase();
        let matches: Vec<&PodcastRecord> = state
            .podcasts
            .values()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect();

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|p| state.assemble(p))
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Podcast>> {
        let state = self.state.read().await;
        Ok(state.podcasts.get(&id).map(|p| state.assemble(p)))
    }

    async fn find_episode(&self, episode_id: i32) -> AppResult<Option<Episode>> {
        let state = self.state.read().await;
        Ok(state.episodes.get(&episode_id).cloned())
    }

    async fn insert(&self, new_podcast: NewPodcast) -> AppResult<PodcastRecord> {
        let mut state = self.state.write().await;
        state.last_podcast_id += 1;
        let record = PodcastRecord {
            id: state.last_podcast_id,
            title: new_podcast.title,
            category: new_podcast.category,
            rating: 0,
            creator_id: new_podcast.creator_id,
        };
        state.podcasts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, changes: &PodcastChanges) -> AppResult<Option<PodcastRecord>> {
        let mut state = self.state.write().await;
        Ok(state.podcasts.get_mut(&id).map(|record| {
            changes.apply_to(record);
            record.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.podcasts.remove(&id).is_none() {
            return Ok(false);
        }

        let orphaned: BTreeSet<i32> = state
            .episodes
            .values()
            .filter(|e| e.podcast_id == id)
            .map(|e| e.id)
            .collect();
        state.episodes.retain(|_, e| e.podcast_id != id);
        state.reviews.retain(|_, r| r.podcast_id != id);
        state.subscriptions.retain(|&(_, podcast_id)| podcast_id != id);
        state
            .played
            .retain(|(_, episode_id)| !orphaned.contains(episode_id));
        Ok(true)
    }

    async fn insert_episode(&self, new_episode: NewEpisode) -> AppResult<Episode> {
        let mut state = self.state.write().await;
        if !state.podcasts.contains_key(&new_episode.podcast_id) {
            return Err(AppError::PodcastNotFound {
                id: new_episode.podcast_id,
            });
        }

        state.last_episode_id += 1;
        let episode = Episode {
            id: state.last_episode_id,
            podcast_id: new_episode.podcast_id,
            title: new_episode.title,
            category: new_episode.category,
        };
        state.episodes.insert(episode.id, episode.clone());
        Ok(episode)
    }

    async fn update_episode(
        &self,
        podcast_id: i32,
        episode_id: i32,
        changes: &EpisodeChanges,
    ) -> AppResult<Option<Episode>> {
        let mut state = self.state.write().await;
        Ok(state
            .episodes
            .get_mut(&episode_id)
            .filter(|e| e.podcast_id == podcast_id)
            .map(|episode| {
                changes.apply_to(episode);
                episode.clone()
            }))
    }

    async fn delete_episode(&self, podcast_id: i32, episode_id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let belongs = state
            .episodes
            .get(&episode_id)
            .is_some_and(|e| e.podcast_id == podcast_id);
        if !belongs {
            return Ok(false);
        }

        state.episodes.remove(&episode_id);
        state.played.retain(|&(_, played)| played != episode_id);
        Ok(true)
    }

    async fn insert_review(&self, new_review: NewReview) -> AppResult<Review> {
        let mut state = self.state.write().await;
        if !state.podcasts.contains_key(&new_review.podcast_id) {
            return Err(AppError::PodcastNotFound {
                id: new_review.podcast_id,
            });
        }

        state.last_review_id += 1;
        let review = Review {
            id: state.last_review_id,
            podcast_id: new_review.podcast_id,
            creator_id: new_review.creator_id,
            title: new_review.title,
            text: new_review.text,
        };
        state.reviews.insert(review.id, review.clone());
        Ok(review)
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn insert(&self, new_account: NewAccount) -> AppResult<Account> {
        let mut state = self.state.write().await;
        if state.email_in_use(&new_account.email, None) {
            return Err(AppError::EmailTaken);
        }

        state.last_account_id += 1;
        let account = Account {
            id: state.last_account_id,
            email: new_account.email,
            password: new_account.password,
            role: new_account.role,
        };
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn update(&self, id: i32, changes: &AccountChanges) -> AppResult<Option<Account>> {
        let mut state = self.state.write().await;
        if let Some(email) = &changes.email {
            if state.email_in_use(email, Some(id)) {
                return Err(AppError::EmailTaken);
            }
        }

        Ok(state.accounts.get_mut(&id).map(|account| {
            changes.apply_to(account);
            account.clone()
        }))
    }

    async fn toggle_subscription(&self, account_id: i32, podcast_id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.podcasts.contains_key(&podcast_id) {
            return Err(AppError::PodcastNotFound { id: podcast_id });
        }

        let link = (account_id, podcast_id);
        if state.subscriptions.remove(&link) {
            Ok(false)
        } else {
            state.subscriptions.insert(link);
            Ok(true)
        }
    }

    async fn subscription_ids(&self, account_id: i32) -> AppResult<Vec<i32>> {
        let state = self.state.read().await;
        Ok(state
            .subscriptions
            .range((account_id, i32::MIN)..=(account_id, i32::MAX))
            .map(|&(_, podcast_id)| podcast_id)
            .collect())
    }

    async fn mark_played(&self, account_id: i32, episode_id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.episodes.contains_key(&episode_id) {
            return Err(AppError::UnknownEpisode { episode_id });
        }
        state.played.insert((account_id, episode_id));
        Ok(())
    }

    async fn played_episode_ids(&self, account_id: i32) -> AppResult<Vec<i32>> {
        let state = self.state.read().await;
        Ok(state
            .played
            .range((account_id, i32::MIN)..=(account_id, i32::MAX))
            .map(|&(_, episode_id)| episode_id)
            .collect())
    }
}
