use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the credential and user stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool for the lifetime of the service. Created at startup,
/// closed explicitly at shutdown; requests borrow one connection at a time from it.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = Self::connect_options(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Connected to database: {}", Self::describe(config));
        Ok(Self { pool })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Waits for checked-out connections to come back, then closes them all.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        match &config.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|_| DatabaseError::InvalidDatabaseUrl),
            None => Ok(PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name)),
        }
    }

    /// Connection target with the password masked, for logs.
    fn describe(config: &DatabaseConfig) -> String {
        match &config.url {
            Some(raw) => match url::Url::parse(raw) {
                Ok(mut url) => {
                    if url.password().is_some() {
                        let _ = url.set_password(Some("***"));
                    }
                    url.to_string()
                }
                Err(_) => "<unparseable DATABASE_URL>".to_string(),
            },
            None => format!(
                "postgres://{}@{}:{}/{}",
                config.user, config.host, config.port, config.name
            ),
        }
    }
}

/// Map a unique-constraint violation to `Duplicate`, anything else passes through.
pub(crate) fn classify(err: sqlx::Error, key: &str) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DatabaseError::Duplicate(key.to_string());
        }
    }
    DatabaseError::Sqlx(err)
}
