use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const GAME_TAG: &str = "Games";
pub const GENDER_TAG: &str = "Genders";
pub const USER_TAG: &str = "Users";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GameDevs API",
        description = "Game catalog backend: games, genders, users and password recovery",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = GAME_TAG, description = "Game catalog; writes require an admin"),
        (name = GENDER_TAG, description = "Game categories; writes require an admin"),
        (name = USER_TAG, description = "User accounts and password recovery"),
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
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
