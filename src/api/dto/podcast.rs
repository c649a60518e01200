//! Podcast, episode and review DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Episode, EpisodeChanges, Podcast, PodcastChanges, PodcastSearchPage, Review};

/// Create podcast request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePodcastRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    #[schema(example = "Rust in Production", min_length = 1)]
    pub title: String,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    #[schema(example = "Technology", min_length = 1)]
    pub category: String,
}

/// Partial podcast update. Absent fields are left untouched.
///
/// Field rules live on [`PodcastChanges`] and are checked by the service after
/// the podcast resolves, so a missing podcast is always reported first.
/// `rating` is read as `i64` so values outside `i32` still get the rating error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePodcastRequest {
    #[schema(example = "Rust in Production", min_length = 1)]
    pub title: Option<String>,
    #[schema(example = "Technology", min_length = 1)]
    pub category: Option<String>,
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: Option<i64>,
}

impl UpdatePodcastRequest {
    pub fn into_changes(self) -> PodcastChanges {
        PodcastChanges {
            title: self.title,
            category: self.category,
            // saturate so an oversized value stays out of range
            rating: self
                .rating
                .map(|rating| rating.clamp(i32::MIN.into(), i32::MAX.into()) as i32),
        }
    }
}

/// Create episode request payload. Blank fields are rejected by the service
/// once the podcast resolves.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEpisodeRequest {
    #[schema(example = "Episode 1: Ownership", min_length = 1)]
    pub title: String,
    #[schema(example = "Technology", min_length = 1)]
    pub category: String,
}

/// Partial episode update, checked like [`UpdatePodcastRequest`].
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEpisodeRequest {
    #[schema(min_length = 1)]
    pub title: Option<String>,
    #[schema(min_length = 1)]
    pub category: Option<String>,
}

impl UpdateEpisodeRequest {
    pub fn into_changes(self) -> EpisodeChanges {
        EpisodeChanges {
            title: self.title,
            category: self.category,
        }
    }
}

/// Create review request payload, checked like [`CreateEpisodeRequest`].
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    #[schema(example = "Great show", min_length = 1)]
    pub title: String,
    #[schema(example = "Clear explanations every week.", min_length = 1)]
    pub text: String,
}

/// Query parameters for the title search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive title substring
    #[param(example = "rust")]
    pub title_query: String,
    /// Page number (1-based, 50 podcasts per page)
    #[serde(default = "default_page")]
    #[param(minimum = 1, example = 1)]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EpisodeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub podcast_id: i32,
    pub title: String,
    pub category: String,
}

impl From<Episode> for EpisodeResponse {
    fn from(episode: Episode) -> Self {
        Self {
            id: episode.id,
            podcast_id: episode.podcast_id,
            title: episode.title,
            category: episode.category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub podcast_id: i32,
    pub creator_id: i32,
    pub title: String,
    pub text: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            podcast_id: review.podcast_id,
            creator_id: review.creator_id,
            title: review.title,
            text: review.text,
        }
    }
}

/// Podcast with its episodes and reviews.
#[derive(Debug, Serialize, ToSchema)]
pub struct PodcastResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Rust in Production")]
    pub title: String,
    #[schema(example = "Technology")]
    pub category: String,
    /// 0 until rated, then 1 to 5
    #[schema(example = 0, minimum = 0, maximum = 5)]
    pub rating: i32,
    pub creator_id: Option<i32>,
    pub episodes: Vec<EpisodeResponse>,
    pub reviews: Vec<ReviewResponse>,
}

impl From<Podcast> for PodcastResponse {
    fn from(podcast: Podcast) -> Self {
        Self {
            id: podcast.id,
            title: podcast.title,
            category: podcast.category,
            rating: podcast.rating,
            creator_id: podcast.creator_id,
            episodes: podcast.episodes.into_iter().map(Into::into).collect(),
            reviews: podcast.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PodcastPayload {
    pub podcast: PodcastResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PodcastListPayload {
    pub podcasts: Vec<PodcastResponse>,
}

impl From<Vec<Podcast>> for PodcastListPayload {
    fn from(podcasts: Vec<Podcast>) -> Self {
        Self {
            podcasts: podcasts.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EpisodePayload {
    pub episode: EpisodeResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EpisodeListPayload {
    pub episodes: Vec<EpisodeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchPayload {
    pub podcasts: Vec<PodcastResponse>,
    #[schema(example = 120)]
    pub total_count: i64,
    #[schema(example = 3)]
    pub total_pages: i64,
}

impl From<PodcastSearchPage> for SearchPayload {
    fn from(page: PodcastSearchPage) -> Self {
        Self {
            podcasts: page.podcasts.into_iter().map(Into::into).collect(),
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::Envelope;
    use serde_json::json;

    #[test]
    fn test_new_podcast_serializes_unrated_and_empty() {
        let podcast = Podcast {
            id: 3,
            title: "T".to_string(),
            category: "C".to_string(),
            rating: 0,
            creator_id: None,
            episodes: vec![],
            reviews: vec![],
        };
        let body = serde_json::to_value(Envelope::ok(PodcastPayload {
            podcast: podcast.into(),
        }))
        .unwrap();

        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["error"], json!(null));
        assert_eq!(body["podcast"]["id"], json!(3));
        assert_eq!(body["podcast"]["rating"], json!(0));
        assert_eq!(body["podcast"]["episodes"], json!([]));
    }

    #[test]
    fn test_update_request_keeps_blank_fields_for_the_service() {
        let request: UpdatePodcastRequest =
            serde_json::from_value(json!({"title": "", "rating": 9})).unwrap();
        let changes = request.into_changes();
        assert_eq!(changes.title.as_deref(), Some(""));
        assert_eq!(changes.rating, Some(9));
    }

    #[test]
    fn test_oversized_rating_stays_out_of_range() {
        let request: UpdatePodcastRequest =
            serde_json::from_value(json!({"rating": 10_000_000_000i64})).unwrap();
        let changes = request.into_changes();
        assert_eq!(changes.rating, Some(i32::MAX));
        assert!(changes.has_invalid_rating());

        let request: UpdatePodcastRequest =
            serde_json::from_value(json!({"rating": -10_000_000_000i64})).unwrap();
        assert!(request.into_changes().has_invalid_rating());
    }

    #[test]
    fn test_search_params_default_page() {
        let params: SearchParams = serde_json::from_value(json!({"title_query": "rust"})).unwrap();
        assert_eq!(params.page, 1);
    }
}
