//! Game catalog handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::GAME_TAG;
use crate::api::dto::{CreateGameRequest, ErrorResponse, GameResponse, UpdateGameRequest};
use crate::error::AppResult;
use crate::services::Caller;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// - `GET /` - List games
/// - `GET /{id}` - Get one game
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_games))
        .routes(routes!(get_game))
}

/// - `POST /` - Create a game
/// - `PATCH /{id}` - Update a game
/// - `DELETE /{id}` - Delete a game
pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_game))
        .routes(routes!(update_game, delete_game))
}

#[utoipa::path(
    get,
    path = "/",
    tag = GAME_TAG,
    responses(
        (status = 200, description = "All games with their gender", body = [GameResponse])
    )
)]
async fn list_games(State(state): State<AppState>) -> AppResult<Json<Vec<GameResponse>>> {
    let games = state.services.games.find_all().await?;
    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = GAME_TAG,
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game found", body = GameResponse),
        (status = 404, description = "Game not found", body = ErrorResponse)
    )
)]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GameResponse>> {
    let game = state.services.games.find_by_id(id).await?;
    Ok(Json(game.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = GAME_TAG,
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameResponse),
        (status = 400, description = "Invalid body or unknown gender", body = ErrorResponse),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Title already exists", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_game(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(payload): ValidatedJson<CreateGameRequest>,
) -> AppResult<(StatusCode, Json<GameResponse>)> {
    let game = state
        .services
        .games
        .create(payload.into_new_game(), &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(game.into())))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = GAME_TAG,
    params(("id" = Uuid, Path, description = "Game id")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameResponse),
        (status = 400, description = "Invalid data or unknown gender", body = ErrorResponse),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Game not found", body = ErrorResponse),
        (status = 422, description = "Title already exists", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_game(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateGameRequest>,
) -> AppResult<Json<GameResponse>> {
    let game = state
        .services
        .games
        .update(id, payload.into_update_game(), &caller)
        .await?;
    Ok(Json(game.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = GAME_TAG,
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Game not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_game(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.games.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
