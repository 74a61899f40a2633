#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use users_api::config::AppConfig;
use users_api::AppState;

pub const SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /users/auth
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        disabled: bool,
    ) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/users/auth"))
            .json(&json!({
                "username": username,
                "password": password,
                "email": format!("{}@example.com", username),
                "full_name": format!("{} Test", username),
                "disabled": disabled,
            }))
            .send()
            .await?;
        Ok(res)
    }

    /// POST /token as a password-grant form
    pub async fn login(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/token"))
            .form(&[("username", username), ("password", password), ("grant_type", "password")])
            .send()
            .await?;
        Ok(res)
    }

    /// Register a fresh enabled account and return a bearer token for it.
    pub async fn token_for(&self, username: &str) -> Result<String> {
        let res = self.register(username, "p1", false).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

        let res = self.login(username, "p1").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("missing access_token")
    }

    pub async fn insert_user(&self, token: &str, name: &str, age: i64) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/insert"))
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "lastname": "Doe",
                "age": age,
                "email": format!("{}@example.com", name.to_lowercase()),
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "insert failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "SECRET_KEY" => Some(SECRET.to_string()),
        "API_MAX_PAGE_SIZE" => Some("50".to_string()),
        _ => None,
    })
    .expect("test configuration")
}

/// Route server logs through the test harness so they only show for failing tests.
/// Filter with RUST_LOG, e.g. RUST_LOG=users_api=debug.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Boot the real router on a free port with in-memory stores. Each test gets its
/// own server because each `#[tokio::test]` owns its runtime.
pub async fn spawn_server() -> Result<TestServer> {
    init_tracing();
    let config = test_config();
    let state = AppState::in_memory(&config);
    let router = users_api::app(state.clone(), &config);

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    tracing::debug!("test server listening on 127.0.0.1:{}", port);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("test server stopped: {}", e);
        }
    });

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
