use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `auth_users` table, digest included. Never serialized to clients.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AuthUser {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub hashed_password: String,
    pub disabled: bool,
}

/// Credential row to insert; `hashed_password` is already a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthUser {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub hashed_password: String,
    pub disabled: bool,
}

impl From<NewAuthUser> for AuthUser {
    fn from(user: NewAuthUser) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            hashed_password: user.hashed_password,
            disabled: user.disabled,
        }
    }
}

/// What clients get to see of a credential row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserView {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
}

impl From<&AuthUser> for AuthUserView {
    fn from(user: &AuthUser) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            disabled: user.disabled,
        }
    }
}
