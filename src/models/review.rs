use diesel::prelude::*;
use validator::Validate;

#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Review {
    pub id: i32,
    pub podcast_id: i32,
    pub creator_id: i32,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Insertable, Clone, Validate)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub podcast_id: i32,
    pub creator_id: i32,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}
