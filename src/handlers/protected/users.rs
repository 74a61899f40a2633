use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::database::{NewUser, UserRecord};
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// GET / - List all user records, ordered by id
pub async fn users_list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<UserRecord>>> {
    let users = state.users.read_all().await?;
    tracing::debug!("'{}' listed {} user records", caller.username, users.len());
    Ok(Json(users))
}

/// GET /api/user/:id - Get a single user record
pub async fn user_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<UserRecord>> {
    state
        .users
        .read_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// POST /api/insert - Create a user record; responds 201 with the stored row
pub async fn user_insert(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserRecord>)> {
    let created = state.users.insert(payload).await?;
    tracing::info!("'{}' created user record {}", caller.username, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/update/:id - Replace every field of a user record
///
/// The body must carry all of name, lastname, age and email; there is no
/// partial merge.
pub async fn user_update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(payload): Json<NewUser>,
) -> ApiResult<StatusCode> {
    if !state.users.update(id, payload).await? {
        return Err(ApiError::not_found("User not found"));
    }
    tracing::info!("'{}' updated user record {}", caller.username, id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/delete/:id - Remove a user record
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if !state.users.delete(id).await? {
        return Err(ApiError::not_found("User not found"));
    }
    tracing::info!("'{}' deleted user record {}", caller.username, id);
    Ok(StatusCode::NO_CONTENT)
}
