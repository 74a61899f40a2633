// handlers/public/token.rs - POST /token handler

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// OAuth2 password-grant form, `application/x-www-form-urlencoded`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /token - Exchange username and password for a bearer token
///
/// Unknown user, wrong password and disabled account all get the same 401.
pub async fn token_post(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let rejected = || ApiError::unauthorized("Incorrect username or password");

    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::bad_request(format!(
                "Unsupported grant_type '{}'",
                grant_type
            )));
        }
    }

    let user = match state.credentials.find(&form.username).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login failed: unknown user '{}'", form.username);
            return Err(rejected());
        }
    };

    if !password::verify(&form.password, &user.hashed_password) {
        tracing::warn!("Login failed: wrong password for '{}'", user.username);
        return Err(rejected());
    }

    if user.disabled {
        tracing::warn!("Login failed: account '{}' is disabled", user.username);
        return Err(rejected());
    }

    let access_token = state.tokens.issue(&user.username)?;
    tracing::info!(
        "Issued access token for '{}' (valid {} min, scope {:?})",
        user.username,
        state.tokens.ttl().num_minutes(),
        form.scope
    );

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
