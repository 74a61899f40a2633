use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{AuthUser, NewAuthUser, NewUser, SearchParams, UserRecord};

/// Username-keyed credential rows. Usernames are unique; there is no update or delete.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create(&self, user: NewAuthUser) -> Result<AuthUser, DatabaseError>;

    async fn find(&self, username: &str) -> Result<Option<AuthUser>, DatabaseError>;
}

/// Single-statement operations over user profile rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, DatabaseError>;

    async fn read_all(&self) -> Result<Vec<UserRecord>, DatabaseError>;

    async fn read_one(&self, id: i32) -> Result<Option<UserRecord>, DatabaseError>;

    /// Overwrites every updatable column; `false` when no row has `id`.
    async fn update(&self, id: i32, user: NewUser) -> Result<bool, DatabaseError>;

    /// `true` iff a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;

    async fn search(&self, params: SearchParams) -> Result<Vec<UserRecord>, DatabaseError>;
}
