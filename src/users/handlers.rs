use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiError,
    state::AppState,
    users::{dto::UserPayload, repo_types::User},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/register", post(register))
        .route("/api/user/update", post(update).put(update))
        .route("/api/user/delete/:id", delete(delete_by_id))
        .route("/api/user/:identifier", get(get_by_email))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    let user = payload.into_new_user()?;
    let stored = state.accounts.register(user).await?;
    Ok(Json(stored))
}

#[instrument(skip(state))]
pub async fn get_by_email(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .accounts
        .find_by_email(&identifier)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    let user = payload.into_user()?;
    state
        .accounts
        .update(user)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state))]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.accounts.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
