use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const PODCAST_TAG: &str = "Podcasts";
pub const EPISODE_TAG: &str = "Episodes";
pub const ACCOUNT_TAG: &str = "Accounts";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Podcast catalog",
        description = "Podcasts, episodes, reviews and listener accounts",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorEnvelope,
            crate::models::Role,
        )
    ),
    tags(
        (name = PODCAST_TAG, description = "Podcast catalog and reviews"),
        (name = EPISODE_TAG, description = "Episodes of a podcast"),
        (name = ACCOUNT_TAG, description = "Registration, login and listener subscriptions"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /api/accounts/login"))
                        .build(),
                ),
            )
        }
    }
}
