//! Mock block explorer API

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use monitor::config::SourceConfig;
use monitor::status::Block;

use super::test_data::explorer_items;

pub const BLOCKS_PATH: &str = "/blocks";

pub struct MockExplorerServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockExplorerServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Source config pointing at this server
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            blocks_endpoint: BLOCKS_PATH.to_string(),
            sample_size: 11,
            report_sample_size: 100,
            request_timeout_seconds: 2,
        }
    }

    pub async fn mock_blocks(&self, blocks: &[Block]) {
        Mock::given(method("GET"))
            .and(path(BLOCKS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(explorer_items(blocks)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_raw(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(BLOCKS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_failure(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path(BLOCKS_PATH))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_balance(&self, address: &str, balance: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/address/{}/gas-balance", address)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "balance": balance }] })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_balance_failure(&self, address: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/address/{}/gas-balance", address)))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
