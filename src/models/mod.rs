mod account;
mod episode;
mod podcast;
mod review;

pub use account::{Account, AccountChanges, AccountProfile, Actor, NewAccount, Role};
pub use episode::{Episode, EpisodeChanges, NewEpisode};
pub use podcast::{NewPodcast, Podcast, PodcastChanges, PodcastRecord, PodcastSearchPage};
pub use review::{NewReview, Review};
