// handlers/public/register.rs - POST /users/auth handler

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::password;
use crate::database::{AuthUserView, NewAuthUser};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    /// Plaintext; older clients send it under the name `hashed_password`.
    #[serde(alias = "hashed_password")]
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// POST /users/auth - Register a credential record
///
/// The password is hashed before it reaches the store; the response never
/// contains the digest. A taken username is a store fault and comes back as 500.
pub async fn register_post(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<AuthUserView>> {
    let hashed_password = password::hash(&payload.password)?;

    let created = state
        .credentials
        .create(NewAuthUser {
            username: payload.username,
            full_name: payload.full_name,
            email: payload.email,
            hashed_password,
            disabled: payload.disabled,
        })
        .await?;

    tracing::info!(
        "Registered account '{}' (disabled: {})",
        created.username,
        created.disabled
    );

    Ok(Json(AuthUserView::from(&created)))
}
