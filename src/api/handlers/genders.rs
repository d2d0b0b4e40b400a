//! Gender handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::GENDER_TAG;
use crate::api::dto::{CreateGenderRequest, ErrorResponse, GenderResponse};
use crate::error::AppResult;
use crate::services::Caller;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_genders))
        .routes(routes!(get_gender))
}

pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_gender))
        .routes(routes!(delete_gender))
}

#[utoipa::path(
    get,
    path = "/",
    tag = GENDER_TAG,
    responses((status = 200, description = "All genders by name", body = [GenderResponse]))
)]
async fn list_genders(State(state): State<AppState>) -> AppResult<Json<Vec<GenderResponse>>> {
    let genders = state.services.genders.find_all().await?;
    Ok(Json(genders.into_iter().map(GenderResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = GENDER_TAG,
    params(("id" = Uuid, Path, description = "Gender id")),
    responses(
        (status = 200, description = "Gender found", body = GenderResponse),
        (status = 404, description = "Gender not found", body = ErrorResponse)
    )
)]
async fn get_gender(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GenderResponse>> {
    let gender = state.services.genders.find_by_id(id).await?;
    Ok(Json(gender.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = GENDER_TAG,
    request_body = CreateGenderRequest,
    responses(
        (status = 201, description = "Gender created", body = GenderResponse),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Name already exists", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_gender(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(payload): ValidatedJson<CreateGenderRequest>,
) -> AppResult<(StatusCode, Json<GenderResponse>)> {
    let gender = state
        .services
        .genders
        .create(payload.into_new_gender(), &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(gender.into())))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = GENDER_TAG,
    params(("id" = Uuid, Path, description = "Gender id")),
    responses(
        (status = 204, description = "Gender deleted"),
        (status = 400, description = "Gender still referenced by games", body = ErrorResponse),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Gender not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_gender(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.genders.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
