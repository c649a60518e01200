//! Podcast repository for async database operations.
//!
//! Aggregate reads run in a read-only repeatable-read transaction so the
//! podcast rows and their children come from the same snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Episode, EpisodeChanges, NewEpisode, NewPodcast, NewReview, Podcast, PodcastChanges,
    PodcastRecord, Review,
};
use crate::repositories::PodcastRepository;
use crate::schema::{episodes, podcasts, reviews};

/// `ILIKE` pattern matching `query` anywhere in the title. Backslash is the
/// default escape character in PostgreSQL, so wildcards in `query` match
/// literally.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Load episodes and reviews for `records` and stitch the aggregates together.
async fn assemble(
    conn: &mut AsyncPgConnection,
    records: Vec<PodcastRecord>,
) -> QueryResult<Vec<Podcast>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();

    let mut episodes_by_podcast: HashMap<i32, Vec<Episode>> = HashMap::new();
    for episode in episodes::table
        .filter(episodes::podcast_id.eq_any(&ids))
        .order(episodes::id.asc())
        .select(Episode::as_select())
        .load(conn)
        .await?
    {
        episodes_by_podcast
            .entry(episode.podcast_id)
            .or_default()
            .push(episode);
    }

    let mut reviews_by_podcast: HashMap<i32, Vec<Review>> = HashMap::new();
    for review in reviews::table
        .filter(reviews::podcast_id.eq_any(&ids))
        .order(reviews::id.asc())
        .select(Review::as_select())
        .load(conn)
        .await?
    {
        reviews_by_podcast
            .entry(review.podcast_id)
            .or_default()
            .push(review);
    }

    Ok(records
        .into_iter()
        .map(|record| {
            let episodes = episodes_by_podcast.remove(&record.id).unwrap_or_default();
            let reviews = reviews_by_podcast.remove(&record.id).unwrap_or_default();
            Podcast::from_parts(record, episodes, reviews)
        })
        .collect())
}

/// Lock the podcast row for the rest of the transaction. `false` when absent.
async fn lock_podcast(conn: &mut AsyncPgConnection, podcast_id: i32) -> QueryResult<bool> {
    podcasts::table
        .filter(podcasts::id.eq(podcast_id))
        .select(podcasts::id)
        .for_update()
        .first::<i32>(conn)
        .await
        .optional()
        .map(|found| found.is_some())
}

/// PostgreSQL podcast repository.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgPodcastRepository {
    pool: AsyncDbPool,
}

impl PgPodcastRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PodcastRepository for PgPodcastRepository {
    async fn list(&self) -> AppResult<Vec<Podcast>> {
        let mut conn = self.pool.get().await?;

        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, AppError, _>(|conn| {
                async move {
                    let records = podcasts::table
                        .order(podcasts::id.asc())
                        .select(PodcastRecord::as_select())
                        .load(conn)
                        .await?;
                    Ok(assemble(conn, records).await?)
                }
                .scope_boxed()
            })
            .await
    }

    async fn search_by_title(
        &self,
        title_query: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Podcast>, i64)> {
        let pattern = contains_pattern(title_query);
        let mut conn = self.pool.get().await?;

        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, AppError, _>(|conn| {
                async move {
                    let total = podcasts::table
                        .filter(podcasts::title.ilike(pattern.as_str()))
                        .count()
                        .get_result::<i64>(conn)
                        .await?;
                    let records = podcasts::table
                        .filter(podcasts::title.ilike(pattern.as_str()))
                        .order(podcasts::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .select(PodcastRecord::as_select())
                        .load(conn)
                        .await?;
                    Ok((assemble(conn, records).await?, total))
                }
                .scope_boxed()
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Podcast>> {
        let mut conn = self.pool.get().await?;

        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, AppError, _>(|conn| {
                async move {
                    let record = podcasts::table
                        .filter(podcasts::id.eq(id))
                        .select(PodcastRecord::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    match record {
                        Some(record) => Ok(assemble(conn, vec![record]).await?.pop()),
                        None => Ok(None),
                    }
                }
                .scope_boxed()
            })
            .await
    }

    async fn find_episode(&self, episode_id: i32) -> AppResult<Option<Episode>> {
        let mut conn = self.pool.get().await?;

        episodes::table
            .filter(episodes::id.eq(episode_id))
            .select(Episode::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn insert(&self, new_podcast: NewPodcast) -> AppResult<PodcastRecord> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(podcasts::table)
            .values(&new_podcast)
            .returning(PodcastRecord::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, id: i32, changes: &PodcastChanges) -> AppResult<Option<PodcastRecord>> {
        let mut conn = self.pool.get().await?;

        diesel::update(podcasts::table.filter(podcasts::id.eq(id)))
            .set(changes)
            .returning(PodcastRecord::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        // episodes, reviews and account links go with it through ON DELETE CASCADE
        let affected = diesel::delete(podcasts::table.filter(podcasts::id.eq(id)))
            .execute(&mut conn)
            .await?;
        Ok(affected > 0)
    }

    async fn insert_episode(&self, new_episode: NewEpisode) -> AppResult<Episode> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                if !lock_podcast(conn, new_episode.podcast_id).await? {
                    return Err(AppError::PodcastNotFound {
                        id: new_episode.podcast_id,
                    });
                }
                let episode = diesel::insert_into(episodes::table)
                    .values(&new_episode)
                    .returning(Episode::as_returning())
                    .get_result(conn)
                    .await?;
                Ok(episode)
            }
            .scope_boxed()
        })
        .await
    }

    async fn update_episode(
        &self,
        podcast_id: i32,
        episode_id: i32,
        changes: &EpisodeChanges,
    ) -> AppResult<Option<Episode>> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            episodes::table
                .filter(episodes::id.eq(episode_id))
                .filter(episodes::podcast_id.eq(podcast_id)),
        )
        .set(changes)
        .returning(Episode::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    async fn delete_episode(&self, podcast_id: i32, episode_id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(
            episodes::table
                .filter(episodes::id.eq(episode_id))
                .filter(episodes::podcast_id.eq(podcast_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(affected > 0)
    }

    async fn insert_review(&self, new_review: NewReview) -> AppResult<Review> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                if !lock_podcast(conn, new_review.podcast_id).await? {
                    return Err(AppError::PodcastNotFound {
                        id: new_review.podcast_id,
                    });
                }
                let review = diesel::insert_into(reviews::table)
                    .values(&new_review)
                    .returning(Review::as_returning())
                    .get_result(conn)
                    .await?;
                Ok(review)
            }
            .scope_boxed()
        })
        .await
    }
}
