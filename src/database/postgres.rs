use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{classify, DatabaseError};
use crate::database::models::{AuthUser, NewAuthUser, NewUser, SearchParams, UserRecord};
use crate::database::repository::{CredentialStore, UserStore};

// Each operation checks one connection out of the pool and runs exactly one
// statement on it. The connection goes back to the pool when `conn` drops,
// on the success path and on every `?`.

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, user: NewAuthUser) -> Result<AuthUser, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let query = r#"
            INSERT INTO auth_users (username, full_name, email, hashed_password, disabled)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING username, full_name, email, hashed_password, disabled
        "#;

        sqlx::query_as::<_, AuthUser>(query)
            .bind(&user.username)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(user.disabled)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| classify(e, &user.username))
    }

    async fn find(&self, username: &str) -> Result<Option<AuthUser>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let query = r#"
            SELECT username, full_name, email, hashed_password, disabled
            FROM auth_users
            WHERE username = $1
        "#;

        let row = sqlx::query_as::<_, AuthUser>(query)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let query = r#"
            INSERT INTO users (name, lastname, age, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, lastname, age, email
        "#;

        let record = sqlx::query_as::<_, UserRecord>(query)
            .bind(&user.name)
            .bind(&user.lastname)
            .bind(user.age)
            .bind(&user.email)
            .fetch_one(&mut *conn)
            .await?;
        Ok(record)
    }

    async fn read_all(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, lastname, age, email FROM users ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    async fn read_one(&self, id: i32) -> Result<Option<UserRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, lastname, age, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, user: NewUser) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let query = r#"
            UPDATE users SET name = $1, lastname = $2, age = $3, email = $4
            WHERE id = $5
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.lastname)
            .bind(user.age)
            .bind(&user.email)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, params: SearchParams) -> Result<Vec<UserRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        // strpos keeps the pattern literal: no LIKE wildcards to escape.
        let query = r#"
            SELECT id, name, lastname, age, email
            FROM users
            WHERE strpos(name, $1) > 0
            ORDER BY id
            OFFSET $2
            LIMIT $3
        "#;

        let rows = sqlx::query_as::<_, UserRecord>(query)
            .bind(&params.name)
            .bind(params.offset)
            .bind(params.limit)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }
}
