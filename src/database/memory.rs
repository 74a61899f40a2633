use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{AuthUser, NewAuthUser, NewUser, SearchParams, UserRecord};
use crate::database::repository::{CredentialStore, UserStore};

/// Process-local credential store, for `serve --in-memory` and tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, AuthUser>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, user: NewAuthUser) -> Result<AuthUser, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(DatabaseError::Duplicate(user.username));
        }
        let row = AuthUser::from(user);
        users.insert(row.username.clone(), row.clone());
        Ok(row)
    }

    async fn find(&self, username: &str) -> Result<Option<AuthUser>, DatabaseError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[derive(Default)]
struct UserTable {
    next_id: i32,
    rows: BTreeMap<i32, UserRecord>,
}

/// Process-local user store. Ids are assigned from 1 upward and never reused,
/// like a SERIAL column.
#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<UserTable>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let record = user.with_id(table.next_id);
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn read_all(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn read_one(&self, id: i32) -> Result<Option<UserRecord>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, user: NewUser) -> Result<bool, DatabaseError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = user.with_id(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn search(&self, params: SearchParams) -> Result<Vec<UserRecord>, DatabaseError> {
        let table = self.table.read().await;
        // An offset usize cannot hold selects no rows.
        let offset = usize::try_from(params.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit).unwrap_or(0);

        Ok(table
            .rows
            .values()
            .filter(|row| params.matches(row))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
