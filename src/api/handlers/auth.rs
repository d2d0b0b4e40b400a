//! Authentication handlers for login and token management.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    ErrorResponse, LoginRequest, LoginResponse, RefreshTokenRequest, TokenResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /login` - Authenticate user and get tokens
/// - `POST /refresh` - Refresh access token using refresh token
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(refresh_token))
}

/// POST /api/auth/login - Authenticate user
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (user, tokens) = state
        .services
        .users
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user: user.into(),
        tokens: tokens.into(),
    }))
}

/// POST /api/auth/refresh - Refresh access token
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed successfully", body = TokenResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let tokens = state.services.users.refresh(&payload.refresh_token).await?;
    Ok(Json(tokens.into()))
}
