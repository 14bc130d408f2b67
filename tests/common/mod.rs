#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use clothing_api::config::AppConfig;
use clothing_api::services::ClothingRepository;
use clothing_api::{app, AppState};

pub const API_KEY: &str = "integration-test-key";

/// In-process server on an ephemeral port, backed by the in-memory store
pub struct TestApp {
    pub base_url: String,
    pub state: AppState,
    client: reqwest::Client,
}

pub async fn spawn_app() -> Result<TestApp> {
    let state = AppState::in_memory(AppConfig::for_memory(API_KEY));
    serve(state).await
}

pub async fn serve(state: AppState) -> Result<TestApp> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind ephemeral port")?;
    let addr = listener.local_addr()?;
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(TestApp {
        base_url: format!("http://{}", addr),
        state,
        client: reqwest::Client::new(),
    })
}

impl TestApp {
    pub fn repo(&self) -> &dyn ClothingRepository {
        self.state.clothing.as_ref()
    }

    /// Authorised JSON request; returns status and parsed envelope
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let mut req = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("x-api-key", API_KEY);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let res = req.send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, path, None).await
    }

    pub async fn create(&self, color: &str, size: &str, price: f64, stock: i64) -> Result<Value> {
        let body = serde_json::json!({ "color": color, "size": size, "price": price, "stock": stock });
        let (status, envelope) = self.send(Method::POST, "/api/v1/clothing", Some(body)).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create failed: {} {}", status, envelope);
        Ok(envelope["data"].clone())
    }

    /// Red/M/10, Dark Red/L/3, Blue/S/0, Green/XL/-2
    pub async fn seed(&self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        for (color, size, stock) in [("Red", "M", 10), ("Dark Red", "L", 3), ("Blue", "S", 0), ("Green", "XL", -2)] {
            items.push(self.create(color, size, 19.99, stock).await?);
        }
        Ok(items)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

pub fn colors(envelope: &Value) -> Vec<String> {
    envelope["data"]
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["color"].as_str().map(String::from)).collect())
        .unwrap_or_default()
}

/// The compiled binary, started with PostgreSQL storage and no database configured
pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn spawn_without_database() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Empty values win over anything a local .env would supply
        let child = Command::new(env!("CARGO_BIN_EXE_clothing-api"))
            .env("HOST", "127.0.0.1")
            .env("CLOTHING_API_PORT", port.to_string())
            .env("CLOTHING_STORAGE", "postgres")
            .env("DATABASE_URL", "")
            .env("MONGO_URL", "")
            .env("API_KEY", API_KEY)
            .env_remove("APP_ENV")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if client.get(format!("{}/", self.base_url)).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
