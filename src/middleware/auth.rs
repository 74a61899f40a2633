use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Every rejection reason shares this message so clients cannot probe account state.
const REJECTED: &str = "Could not validate credentials";

/// Authenticated account, injected into request extensions by `jwt_auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl From<AuthUser> for AuthenticatedUser {
    fn from(user: AuthUser) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// Bearer-token gate for protected routes. The request never reaches the handler
/// unless the token verifies and names an existing, enabled account.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(|msg| {
        tracing::warn!("Authentication rejected: {}", msg);
        ApiError::unauthorized(REJECTED)
    })?;

    let username = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Authentication rejected: {}", e);
        ApiError::unauthorized(REJECTED)
    })?;

    let user = match state.credentials.find(&username).await? {
        Some(user) if !user.disabled => user,
        Some(_) => {
            tracing::warn!("Authentication rejected: account '{}' is disabled", username);
            return Err(ApiError::unauthorized(REJECTED));
        }
        None => {
            tracing::warn!("Authentication rejected: account '{}' does not exist", username);
            return Err(ApiError::unauthorized(REJECTED));
        }
    };

    tracing::debug!("Authenticated request for '{}'", user.username);
    request.extensions_mut().insert(AuthenticatedUser::from(user));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or("Authorization header must use Bearer token format")?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err("Authorization header must use Bearer token format");
    }

    let token = token.trim();
    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}
