//! Podcast, episode and review endpoints.
//!
//! Reads are public. Writes need a bearer token; ownership is checked by the
//! service after the target resolves, role restrictions here via `require_role`.

use axum::{Extension, extract::State, http::StatusCode, middleware};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::{EPISODE_TAG, PODCAST_TAG};
use crate::api::dto::{
    Ack, CreateEpisodeRequest, CreatePodcastRequest, CreateReviewRequest, Created, Envelope,
    EpisodeListPayload, EpisodePayload, ErrorEnvelope, PodcastListPayload, PodcastPayload,
    SearchParams, SearchPayload, UpdateEpisodeRequest, UpdatePodcastRequest,
};
use crate::api::middleware::{AuthUser, auth_middleware, require_role};
use crate::error::AppResult;
use crate::models::Role;
use crate::state::AppState;
use crate::utils::validate::{ApiJson, ApiPath, ApiQuery, ValidatedJson};

/// Creates the podcast routes
///
/// # Routes
/// - `GET /` - List podcasts
/// - `POST /` - Create a podcast (Host)
/// - `GET /search` - Search podcasts by title
/// - `GET|PATCH|DELETE /{id}` - Read, patch or delete a podcast
/// - `GET|POST /{id}/episodes` - List or create episodes
/// - `GET|PATCH|DELETE /{id}/episodes/{episode_id}` - Single episode
/// - `POST /{id}/reviews` - Review a podcast (Listener)
pub fn podcast_routes(state: AppState) -> OpenApiRouter<AppState> {
    let public = OpenApiRouter::new()
        .routes(routes!(list_podcasts))
        .routes(routes!(search_podcasts))
        .routes(routes!(get_podcast))
        .routes(routes!(get_episodes))
        .routes(routes!(get_episode));

    let protected = OpenApiRouter::new()
        .routes(routes!(create_podcast))
        .routes(routes!(update_podcast, delete_podcast))
        .routes(routes!(create_episode))
        .routes(routes!(update_episode, delete_episode))
        .routes(routes!(create_review))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// GET /api/podcasts - List podcasts in creation order
#[utoipa::path(
    get,
    path = "/",
    tag = PODCAST_TAG,
    responses(
        (status = 200, description = "All podcasts", body = Envelope<PodcastListPayload>)
    )
)]
async fn list_podcasts(State(state): State<AppState>) -> AppResult<Envelope<PodcastListPayload>> {
    let podcasts = state.services.podcasts.list_podcasts().await?;
    Ok(Envelope::ok(podcasts.into()))
}

/// POST /api/podcasts - Create a podcast owned by the caller
#[utoipa::path(
    post,
    path = "/",
    tag = PODCAST_TAG,
    request_body = CreatePodcastRequest,
    responses(
        (status = 201, description = "Podcast created", body = Envelope<Created>),
        (status = 400, description = "Invalid request data", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Caller is not a host", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn create_podcast(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreatePodcastRequest>,
) -> AppResult<(StatusCode, Envelope<Created>)> {
    require_role(&auth_user, Role::Host)?;

    let id = state
        .services
        .podcasts
        .create_podcast(payload.title, payload.category, Some(auth_user.account_id))
        .await?;
    Ok((StatusCode::CREATED, Envelope::ok(Created { id })))
}

/// GET /api/podcasts/search - Search podcasts by title
#[utoipa::path(
    get,
    path = "/search",
    tag = PODCAST_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matches", body = Envelope<SearchPayload>),
        (status = 400, description = "Invalid page", body = ErrorEnvelope)
    )
)]
async fn search_podcasts(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<Envelope<SearchPayload>> {
    let page = state
        .services
        .podcasts
        .search_podcasts(&params.title_query, params.page)
        .await?;
    Ok(Envelope::ok(page.into()))
}

/// GET /api/podcasts/{id} - Podcast with its episodes and reviews
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PODCAST_TAG,
    params(("id" = i32, Path, description = "Podcast id")),
    responses(
        (status = 200, description = "The podcast", body = Envelope<PodcastPayload>),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    )
)]
async fn get_podcast(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Envelope<PodcastPayload>> {
    let podcast = state.services.podcasts.get_podcast(id).await?;
    Ok(Envelope::ok(PodcastPayload {
        podcast: podcast.into(),
    }))
}

/// PATCH /api/podcasts/{id} - Patch title, category or rating
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = PODCAST_TAG,
    params(("id" = i32, Path, description = "Podcast id")),
    request_body = UpdatePodcastRequest,
    responses(
        (status = 200, description = "Podcast updated", body = Envelope<Ack>),
        (status = 400, description = "Invalid rating or fields", body = ErrorEnvelope),
        (status = 403, description = "Caller does not own the podcast", body = ErrorEnvelope),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn update_podcast(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdatePodcastRequest>,
) -> AppResult<Envelope<Ack>> {
    state
        .services
        .podcasts
        .update_podcast(id, payload.into_changes(), Some(auth_user.actor()))
        .await?;
    Ok(Envelope::ok(Ack::default()))
}

/// DELETE /api/podcasts/{id} - Delete a podcast and everything it owns
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PODCAST_TAG,
    params(("id" = i32, Path, description = "Podcast id")),
    responses(
        (status = 200, description = "Podcast deleted", body = Envelope<Ack>),
        (status = 403, description = "Caller does not own the podcast", body = ErrorEnvelope),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_podcast(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Envelope<Ack>> {
    state
        .services
        .podcasts
        .delete_podcast(id, Some(auth_user.actor()))
        .await?;
    Ok(Envelope::ok(Ack::default()))
}

/// GET /api/podcasts/{id}/episodes
#[utoipa::path(
    get,
    path = "/{id}/episodes",
    tag = EPISODE_TAG,
    params(("id" = i32, Path, description = "Podcast id")),
    responses(
        (status = 200, description = "Episodes of the podcast", body = Envelope<EpisodeListPayload>),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    )
)]
async fn get_episodes(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Envelope<EpisodeListPayload>> {
    let episodes = state.services.podcasts.get_episodes(id).await?;
    Ok(Envelope::ok(EpisodeListPayload {
        episodes: episodes.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/podcasts/{id}/episodes - Add an episode to an owned podcast
#[utoipa::path(
    post,
    path = "/{id}/episodes",
    tag = EPISODE_TAG,
    params(("id" = i32, Path, description = "Podcast id")),
    request_body = CreateEpisodeRequest,
    responses(
        (status = 201, description = "Episode created", body = Envelope<Created>),
        (status = 400, description = "Blank title or category", body = ErrorEnvelope),
        (status = 403, description = "Not a host or not the owner", body = ErrorEnvelope),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn create_episode(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CreateEpisodeRequest>,
) -> AppResult<(StatusCode, Envelope<Created>)> {
    require_role(&auth_user, Role::Host)?;

    let episode_id = state
        .services
        .podcasts
        .create_episode(id, payload.title, payload.category, Some(auth_user.actor()))
        .await?;
    Ok((StatusCode::CREATED, Envelope::ok(Created { id: episode_id })))
}

/// GET /api/podcasts/{id}/episodes/{episode_id}
#[utoipa::path(
    get,
    path = "/{id}/episodes/{episode_id}",
    tag = EPISODE_TAG,
    params(
        ("id" = i32, Path, description = "Podcast id"),
        ("episode_id" = i32, Path, description = "Episode id")
    ),
    responses(
        (status = 200, description = "The episode", body = Envelope<EpisodePayload>),
        (status = 404, description = "Podcast or episode not found", body = ErrorEnvelope)
    )
)]
async fn get_episode(
    State(state): State<AppState>,
    ApiPath((id, episode_id)): ApiPath<(i32, i32)>,
) -> AppResult<Envelope<EpisodePayload>> {
    let episode = state.services.podcasts.get_episode(id, episode_id).await?;
    Ok(Envelope::ok(EpisodePayload {
        episode: episode.into(),
    }))
}

/// PATCH /api/podcasts/{id}/episodes/{episode_id}
#[utoipa::path(
    patch,
    path = "/{id}/episodes/{episode_id}",
    tag = EPISODE_TAG,
    params(
        ("id" = i32, Path, description = "Podcast id"),
        ("episode_id" = i32, Path, description = "Episode id")
    ),
    request_body = UpdateEpisodeRequest,
    responses(
        (status = 200, description = "Episode updated", body = Envelope<Ack>),
        (status = 400, description = "Blank title or category", body = ErrorEnvelope),
        (status = 403, description = "Caller does not own the podcast", body = ErrorEnvelope),
        (status = 404, description = "Podcast or episode not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn update_episode(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath((id, episode_id)): ApiPath<(i32, i32)>,
    ApiJson(payload): ApiJson<UpdateEpisodeRequest>,
) -> AppResult<Envelope<Ack>> {
    state
        .services
        .podcasts
        .update_episode(id, episode_id, payload.into_changes(), Some(auth_user.actor()))
        .await?;
    Ok(Envelope::ok(Ack::default()))
}

/// DELETE /api/podcasts/{id}/episodes/{episode_id}
#[utoipa::path(
    delete,
    path = "/{id}/episodes/{episode_id}",
    tag = EPISODE_TAG,
    params(
        ("id" = i32, Path, description = "Podcast id"),
        ("episode_id" = i32, Path, description = "Episode id")
    ),
    responses(
        (status = 200, description = "Episode deleted", body = Envelope<Ack>),
        (status = 403, description = "Caller does not own the podcast", body = ErrorEnvelope),
        (status = 404, description = "Podcast or episode not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_episode(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath((id, episode_id)): ApiPath<(i32, i32)>,
) -> AppResult<Envelope<Ack>> {
    state
        .services
        .podcasts
        .delete_episode(id, episode_id, Some(auth_user.actor()))
        .await?;
    Ok(Envelope::ok(Ack::default()))
}

/// POST /api/podcasts/{id}/reviews - Review a podcast as a listener
#[utoipa::path(
    post,
    path = "/{id}/reviews",
    tag = PODCAST_TAG,
    params(("id" = i32, Path, description = "Podcast id")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Envelope<Created>),
        (status = 400, description = "Blank title or text", body = ErrorEnvelope),
        (status = 403, description = "Caller is not a listener", body = ErrorEnvelope),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn create_review(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Envelope<Created>)> {
    require_role(&auth_user, Role::Listener)?;

    let review_id = state
        .services
        .podcasts
        .create_review(auth_user.account_id, id, payload.title, payload.text)
        .await?;
    Ok((StatusCode::CREATED, Envelope::ok(Created { id: review_id })))
}
