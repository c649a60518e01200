//! Account endpoints: registration, login, profiles and listener links.

use axum::{Extension, extract::State, http::StatusCode, middleware};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ACCOUNT_TAG;
use crate::api::dto::{
    Ack, AccountPayload, CreateAccountRequest, Created, EditProfileRequest, Envelope,
    ErrorEnvelope, LoginPayload, LoginRequest, PodcastListPayload, ProfilePayload,
    SubscriptionPayload,
};
use crate::api::middleware::{AuthUser, auth_middleware, require_role};
use crate::error::AppResult;
use crate::models::Role;
use crate::state::AppState;
use crate::utils::validate::{ApiPath, ValidatedJson};

/// Creates the account routes
///
/// # Routes
/// - `POST /` - Register an account
/// - `POST /login` - Exchange credentials for an access token
/// - `GET|PATCH /me` - The caller's profile
/// - `GET /{id}` - Another account's public information
/// - `GET /me/subscriptions` - Subscribed podcasts (Listener)
/// - `POST /me/subscriptions/{podcast_id}` - Toggle a subscription (Listener)
/// - `POST /me/played/{episode_id}` - Mark an episode played (Listener)
pub fn account_routes(state: AppState) -> OpenApiRouter<AppState> {
    let public = OpenApiRouter::new()
        .routes(routes!(create_account))
        .routes(routes!(login));

    let protected = OpenApiRouter::new()
        .routes(routes!(get_me, edit_me))
        .routes(routes!(get_account))
        .routes(routes!(get_subscriptions))
        .routes(routes!(toggle_subscription))
        .routes(routes!(mark_played))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// POST /api/accounts - Register an account
#[utoipa::path(
    post,
    path = "/",
    tag = ACCOUNT_TAG,
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = Envelope<Created>),
        (status = 400, description = "Invalid request data", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope)
    )
)]
async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Envelope<Created>)> {
    let account = state
        .services
        .accounts
        .create_account(payload.email, &payload.password, payload.role)
        .await?;
    Ok((StatusCode::CREATED, Envelope::ok(Created { id: account.id })))
}

/// POST /api/accounts/login - Authenticate and get an access token
#[utoipa::path(
    post,
    path = "/login",
    tag = ACCOUNT_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = Envelope<LoginPayload>),
        (status = 401, description = "Wrong password", body = ErrorEnvelope),
        (status = 404, description = "Unknown email", body = ErrorEnvelope)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Envelope<LoginPayload>> {
    let token = state
        .services
        .accounts
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Envelope::ok(LoginPayload { token }))
}

/// GET /api/accounts/me - The caller's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Current account", body = Envelope<ProfilePayload>),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn get_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Envelope<ProfilePayload>> {
    let profile = state
        .services
        .accounts
        .get_profile(auth_user.account_id)
        .await?;
    Ok(Envelope::ok(ProfilePayload {
        profile: profile.into(),
    }))
}

/// PATCH /api/accounts/me - Change email and/or password
#[utoipa::path(
    patch,
    path = "/me",
    tag = ACCOUNT_TAG,
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = Envelope<ProfilePayload>),
        (status = 400, description = "Invalid request data", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn edit_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<EditProfileRequest>,
) -> AppResult<Envelope<ProfilePayload>> {
    let profile = state
        .services
        .accounts
        .edit_profile(auth_user.account_id, payload.into_changes())
        .await?;
    Ok(Envelope::ok(ProfilePayload {
        profile: profile.into(),
    }))
}

/// GET /api/accounts/{id} - Public information of an account
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ACCOUNT_TAG,
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "The account", body = Envelope<AccountPayload>),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn get_account(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Envelope<AccountPayload>> {
    let account = state.services.accounts.get_account(id).await?;
    Ok(Envelope::ok(AccountPayload {
        account: account.into(),
    }))
}

/// GET /api/accounts/me/subscriptions - Podcasts the listener follows
#[utoipa::path(
    get,
    path = "/me/subscriptions",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Subscribed podcasts", body = Envelope<PodcastListPayload>),
        (status = 403, description = "Caller is not a listener", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn get_subscriptions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Envelope<PodcastListPayload>> {
    require_role(&auth_user, Role::Listener)?;

    let podcasts = state
        .services
        .accounts
        .subscriptions(auth_user.account_id)
        .await?;
    Ok(Envelope::ok(podcasts.into()))
}

/// POST /api/accounts/me/subscriptions/{podcast_id} - Subscribe or unsubscribe
#[utoipa::path(
    post,
    path = "/me/subscriptions/{podcast_id}",
    tag = ACCOUNT_TAG,
    params(("podcast_id" = i32, Path, description = "Podcast id")),
    responses(
        (status = 200, description = "Membership after the toggle", body = Envelope<SubscriptionPayload>),
        (status = 403, description = "Caller is not a listener", body = ErrorEnvelope),
        (status = 404, description = "Podcast not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn toggle_subscription(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(podcast_id): ApiPath<i32>,
) -> AppResult<Envelope<SubscriptionPayload>> {
    require_role(&auth_user, Role::Listener)?;

    let subscribed = state
        .services
        .accounts
        .toggle_subscribe(auth_user.account_id, podcast_id)
        .await?;
    Ok(Envelope::ok(SubscriptionPayload { subscribed }))
}

/// POST /api/accounts/me/played/{episode_id} - Mark an episode as played
#[utoipa::path(
    post,
    path = "/me/played/{episode_id}",
    tag = ACCOUNT_TAG,
    params(("episode_id" = i32, Path, description = "Episode id")),
    responses(
        (status = 200, description = "Episode marked as played", body = Envelope<Ack>),
        (status = 403, description = "Caller is not a listener", body = ErrorEnvelope),
        (status = 404, description = "Episode not found", body = ErrorEnvelope)
    ),
    security(("bearerAuth" = []))
)]
async fn mark_played(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(episode_id): ApiPath<i32>,
) -> AppResult<Envelope<Ack>> {
    require_role(&auth_user, Role::Listener)?;

    state
        .services
        .accounts
        .mark_episode_played(auth_user.account_id, episode_id)
        .await?;
    Ok(Envelope::ok(Ack::default()))
}
