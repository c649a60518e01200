use diesel::prelude::*;
use validator::Validate;

#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::episodes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Episode {
    pub id: i32,
    pub podcast_id: i32,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Insertable, Clone, Validate)]
#[diesel(table_name = crate::schema::episodes)]
pub struct NewEpisode {
    pub podcast_id: i32,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,
}

/// Partial update for an episode. `None` leaves the stored value untouched.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq, Validate)]
#[diesel(table_name = crate::schema::episodes)]
pub struct EpisodeChanges {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
}

impl EpisodeChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none()
    }

    pub fn apply_to(&self, episode: &mut Episode) {
        if let Some(title) = &self.title {
            episode.title = title.clone();
        }
        if let Some(category) = &self.category {
            episode.category = category.clone();
        }
    }
}
