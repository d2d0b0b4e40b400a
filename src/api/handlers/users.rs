//! User account handlers, including password recovery.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, MessageResponse, RecoverPasswordRequest,
    ResetPasswordRequest, UpdateUserRequest, UserDetailResponse, UserResponse,
};
use crate::error::AppResult;
use crate::services::Caller;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// - `POST /` - Register
/// - `POST /recover` - Request a recovery email
/// - `POST /reset-password` - Set a new password with a recovery token
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user))
        .routes(routes!(recover_password))
        .routes(routes!(reset_password))
}

/// - `GET /` - List users
/// - `GET /{id}` - Get a user with profiles
/// - `PATCH /{id}` - Update self (or anyone, as admin)
/// - `DELETE /{id}` - Remove self (or anyone, as admin)
pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(get_user, update_user, remove_user))
}

#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 422, description = "Email or CPF already registered", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    // Open signup: admins are promoted afterwards through PATCH
    let user = state.services.users.create(payload.into_new_user(), None).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User with profiles", body = UserDetailResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserDetailResponse>> {
    let user = state.services.users.find_one(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 401, description = "Neither the user nor an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Email or CPF already registered", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .update(id, payload.into_update_user(), &caller)
        .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Removed user", body = UserResponse),
        (status = 401, description = "Neither the user nor an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn remove_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.remove(id, &caller).await?;
    Ok(Json(user.into()))
}

/// Always answers with the same message so callers cannot probe for accounts.
#[utoipa::path(
    post,
    path = "/recover",
    tag = USER_TAG,
    request_body = RecoverPasswordRequest,
    responses(
        (status = 200, description = "Email sent if it exists", body = MessageResponse)
    )
)]
async fn recover_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RecoverPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let message = state
        .services
        .users
        .find_user_for_email(&payload.email)
        .await?;
    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/reset-password",
    tag = USER_TAG,
    request_body = ResetPasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 401, description = "Invalid or expired recovery token", body = ErrorResponse)
    )
)]
async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .users
        .reset_password(&payload.token, payload.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
