//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `envelope` - The `{ok, error, ...}` wrapper every endpoint answers with
//! - `podcast` - Podcast, episode, review and search DTOs
//! - `account` - Registration, login and profile DTOs
//! - `health` - Health check DTOs

mod account;
mod envelope;
mod health;
mod podcast;

pub use account::{
    AccountPayload, AccountResponse, CreateAccountRequest, EditProfileRequest, LoginPayload,
    LoginRequest, ProfilePayload, ProfileResponse, SubscriptionPayload,
};
pub use envelope::{Ack, Created, Envelope, ErrorEnvelope};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use podcast::{
    CreateEpisodeRequest, CreatePodcastRequest, CreateReviewRequest, EpisodeListPayload,
    EpisodePayload, EpisodeResponse, PodcastListPayload, PodcastPayload, PodcastResponse,
    ReviewResponse, SearchParams, SearchPayload, UpdateEpisodeRequest, UpdatePodcastRequest,
};
