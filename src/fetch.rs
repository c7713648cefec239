use reqwest::Client;
use reqwest::header::COOKIE;
use std::{env, future::Future};

use crate::errors::FetchError;
use crate::models::DashboardSnapshot;

/// Where the upstream planner lives and which session rides along on every
/// request to it.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub session_cookie: Option<String>,
}

impl UpstreamConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("DASHBOARD_UPSTREAM_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let session_cookie = env::var("DASHBOARD_SESSION").ok();
        Self {
            base_url,
            session_cookie,
        }
    }

    pub fn summary_url(&self) -> String {
        format!("{}/planner/api/dashboard", self.base_url.trim_end_matches('/'))
    }

    pub fn log_url(&self) -> String {
        format!("{}/planner/api/log", self.base_url.trim_end_matches('/'))
    }

    pub fn cookie_header(&self) -> Option<String> {
        self.session_cookie
            .as_ref()
            .map(|value| format!("session={value}"))
    }
}

/// Anything that can produce a dashboard snapshot. The HTTP source below is
/// the real one; tests substitute in-memory sources with scripted outcomes.
pub trait SnapshotSource: Send + Sync {
    fn fetch_snapshot(
        &self,
    ) -> impl Future<Output = Result<DashboardSnapshot, FetchError>> + Send;
}

#[derive(Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    config: UpstreamConfig,
}

impl HttpSnapshotSource {
    pub fn new(client: Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn fetch_snapshot(
        &self,
    ) -> impl Future<Output = Result<DashboardSnapshot, FetchError>> + Send {
        let mut request = self.client.get(self.config.summary_url());
        if let Some(cookie) = self.config.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        async move {
            let response = request.send().await.map_err(FetchError::Network)?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Protocol(status));
            }
            // Read the body ourselves so a malformed payload surfaces as a
            // shape failure rather than a transport error.
            let body = response.bytes().await.map_err(FetchError::Network)?;
            serde_json::from_slice(&body).map_err(FetchError::Shape)
        }
    }
}
