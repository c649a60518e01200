//! Podcast aggregate models.

use diesel::prelude::*;
use validator::Validate;

use crate::models::{Episode, Review};

/// Lowest rating an explicit update may set. `0` only exists as the unrated default.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A single row of the `podcasts` table, without its children.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::podcasts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PodcastRecord {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub rating: i32,
    pub creator_id: Option<i32>,
}

/// A podcast together with the episodes and reviews it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Podcast {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub rating: i32,
    pub creator_id: Option<i32>,
    pub episodes: Vec<Episode>,
    pub reviews: Vec<Review>,
}

impl Podcast {
    pub fn from_parts(record: PodcastRecord, episodes: Vec<Episode>, reviews: Vec<Review>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            category: record.category,
            rating: record.rating,
            creator_id: record.creator_id,
            episodes,
            reviews,
        }
    }

    /// Whether `account_id` created this podcast. Podcasts without a creator are owned by nobody.
    pub fn is_owned_by(&self, account_id: i32) -> bool {
        self.creator_id == Some(account_id)
    }

    pub fn episode(&self, episode_id: i32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == episode_id)
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::podcasts)]
pub struct NewPodcast {
    pub title: String,
    pub category: String,
    pub creator_id: Option<i32>,
}

/// Partial update for a podcast. `None` leaves the stored value untouched.
///
/// The field rules are checked by the service once the podcast resolves;
/// `rating` has its own check with a dedicated error.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq, Validate)]
#[diesel(table_name = crate::schema::podcasts)]
pub struct PodcastChanges {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
    pub rating: Option<i32>,
}

impl PodcastChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.rating.is_none()
    }

    /// Rating present and outside `[MIN_RATING, MAX_RATING]`.
    pub fn has_invalid_rating(&self) -> bool {
        self.rating
            .is_some_and(|rating| !(MIN_RATING..=MAX_RATING).contains(&rating))
    }

    /// Merge onto an in-memory record.
    pub fn apply_to(&self, record: &mut PodcastRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
    }
}

/// One page of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastSearchPage {
    pub podcasts: Vec<Podcast>,
    pub total_count: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record() -> PodcastRecord {
        PodcastRecord {
            id: 1,
            title: "T".to_string(),
            category: "C".to_string(),
            rating: 0,
            creator_id: Some(9),
        }
    }

    #[test]
    fn test_empty_changes() {
        assert!(PodcastChanges::default().is_empty());
        let changes = PodcastChanges {
            rating: Some(3),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut stored = record();
        PodcastChanges {
            title: Some("X".to_string()),
            ..Default::default()
        }
        .apply_to(&mut stored);

        assert_eq!(stored.title, "X");
        assert_eq!(stored.category, "C");
        assert_eq!(stored.rating, 0);
        assert_eq!(stored.creator_id, Some(9));
    }

    #[test]
    fn test_ownership() {
        let podcast = Podcast::from_parts(record(), vec![], vec![]);
        assert!(podcast.is_owned_by(9));
        assert!(!podcast.is_owned_by(10));

        let orphan = Podcast {
            creator_id: None,
            ..podcast
        };
        assert!(!orphan.is_owned_by(9));
    }

    proptest! {
        #[test]
        fn prop_rating_bounds(rating in -100i32..100) {
            let changes = PodcastChanges { rating: Some(rating), ..Default::default() };
            prop_assert_eq!(changes.has_invalid_rating(), !(1..=5).contains(&rating));
        }
    }
}
