use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::game::{CreateMatchRequest, MatchListItem, MatchSnapshot, ThrowRequest},
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Routes handling match lifecycle and scoring operations.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", post(create_match).get(list_matches))
        .route("/matches/{id}", get(get_match).delete(delete_match))
        .route("/matches/{id}/throws", post(record_throw))
        .route("/matches/{id}/undo", post(undo_throw))
}

/// Open a fresh match and register it.
#[utoipa::path(
    post,
    path = "/matches",
    tag = "match",
    request_body = CreateMatchRequest,
    responses(
        (status = 200, description = "Match opened", body = MatchSnapshot),
        (status = 400, description = "Invalid mode or player list")
    )
)]
pub async fn create_match(
    State(state): State<SharedState>,
    Json(payload): Json<CreateMatchRequest>,
) -> Result<Json<MatchSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = match_service::create_match(&state, payload).await?;
    Ok(Json(snapshot))
}

/// List every registered match, most recently updated first.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "match",
    responses(
        (status = 200, description = "Registered matches", body = [MatchListItem])
    )
)]
pub async fn list_matches(State(state): State<SharedState>) -> Json<Vec<MatchListItem>> {
    Json(match_service::list_matches(&state).await)
}

/// Fetch the full snapshot of one match.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "match",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match snapshot", body = MatchSnapshot),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchSnapshot>, AppError> {
    let snapshot = match_service::get_match(&state, id).await?;
    Ok(Json(snapshot))
}

/// Record one dart for the active player of a match.
#[utoipa::path(
    post,
    path = "/matches/{id}/throws",
    tag = "match",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    request_body = ThrowRequest,
    responses(
        (status = 200, description = "Throw committed", body = MatchSnapshot),
        (status = 400, description = "Impossible dart"),
        (status = 404, description = "Unknown match"),
        (status = 409, description = "Match already decided")
    )
)]
pub async fn record_throw(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ThrowRequest>,
) -> Result<Json<MatchSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = match_service::record_throw(&state, id, payload).await?;
    Ok(Json(snapshot))
}

/// Take back the last dart of the active turn. A turn that has already
/// rotated away stays sealed; the call then returns the unchanged
/// snapshot.
#[utoipa::path(
    post,
    path = "/matches/{id}/undo",
    tag = "match",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Undo committed", body = MatchSnapshot),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn undo_throw(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchSnapshot>, AppError> {
    let snapshot = match_service::undo_throw(&state, id).await?;
    Ok(Json(snapshot))
}

/// Drop a match from the registry.
#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "match",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match deleted"),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn delete_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<(), AppError> {
    match_service::delete_match(&state, id).await?;
    Ok(())
}
