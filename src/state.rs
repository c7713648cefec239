use reqwest::Client;

use crate::dashboard::Dashboard;
use crate::fetch::{HttpSnapshotSource, UpstreamConfig};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard<HttpSnapshotSource>,
    pub client: Client,
    pub upstream: UpstreamConfig,
}

impl AppState {
    pub fn new(client: Client, upstream: UpstreamConfig) -> Self {
        let source = HttpSnapshotSource::new(client.clone(), upstream.clone());
        Self {
            dashboard: Dashboard::new(source),
            client,
            upstream,
        }
    }
}
