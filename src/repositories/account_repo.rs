//! Account repository for async database operations.
//!
//! Unique violations on `accounts.email` surface as `AppError::EmailTaken`
//! through the diesel error converter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Account, AccountChanges, NewAccount};
use crate::repositories::AccountRepository;
use crate::schema::{accounts, episodes, played_episodes, podcasts, subscriptions};

/// PostgreSQL account repository.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: AsyncDbPool,
}

impl PgAccountRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn insert(&self, new_account: NewAccount) -> AppResult<Account> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        let mut conn = self.pool.get().await?;

        accounts::table
            .filter(accounts::id.eq(id))
            .select(Account::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let mut conn = self.pool.get().await?;

        accounts::table
            .filter(accounts::email.eq(email))
            .select(Account::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn update(&self, id: i32, changes: &AccountChanges) -> AppResult<Option<Account>> {
        let mut conn = self.pool.get().await?;

        diesel::update(accounts::table.filter(accounts::id.eq(id)))
            .set(changes)
            .returning(Account::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn toggle_subscription(&self, account_id: i32, podcast_id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let exists = podcasts::table
                    .filter(podcasts::id.eq(podcast_id))
                    .select(podcasts::id)
                    .for_share()
                    .first::<i32>(conn)
                    .await
                    .optional()?;
                if exists.is_none() {
                    return Err(AppError::PodcastNotFound { id: podcast_id });
                }

                let removed = diesel::delete(
                    subscriptions::table
                        .filter(subscriptions::account_id.eq(account_id))
                        .filter(subscriptions::podcast_id.eq(podcast_id)),
                )
                .execute(conn)
                .await?;
                if removed > 0 {
                    return Ok(false);
                }

                diesel::insert_into(subscriptions::table)
                    .values((
                        subscriptions::account_id.eq(account_id),
                        subscriptions::podcast_id.eq(podcast_id),
                    ))
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
    }

    async fn subscription_ids(&self, account_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        subscriptions::table
            .filter(subscriptions::account_id.eq(account_id))
            .order(subscriptions::podcast_id.asc())
            .select(subscriptions::podcast_id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn mark_played(&self, account_id: i32, episode_id: i32) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let exists = episodes::table
                    .filter(episodes::id.eq(episode_id))
                    .select(episodes::id)
                    .for_share()
                    .first::<i32>(conn)
                    .await
                    .optional()?;
                if exists.is_none() {
                    return Err(AppError::UnknownEpisode { episode_id });
                }

                diesel::insert_into(played_episodes::table)
                    .values((
                        played_episodes::account_id.eq(account_id),
                        played_episodes::episode_id.eq(episode_id),
                    ))
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn played_episode_ids(&self, account_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        played_episodes::table
            .filter(played_episodes::account_id.eq(account_id))
            .order(played_episodes::episode_id.asc())
            .select(played_episodes::episode_id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
