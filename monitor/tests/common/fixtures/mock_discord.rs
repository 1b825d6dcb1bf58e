//! Mock Discord REST API for gateway tests

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "test-bot-token";

pub struct MockDiscordServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockDiscordServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub async fn mock_channel(&self, id: &str, name: &str, guild_id: Option<&str>) {
        Mock::given(method("GET"))
            .and(path(format!("/channels/{}", id)))
            .and(header("Authorization", format!("Bot {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": name,
                "guild_id": guild_id,
                "type": 0,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_missing_channel(&self, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/channels/{}", id)))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "message": "Unknown Channel", "code": 10003 })),
            )
            .mount(&self.server)
            .await;
    }

    /// Expect exactly one rename of `id` to `name`
    pub async fn expect_rename(&self, id: &str, name: &str) {
        Mock::given(method("PATCH"))
            .and(path(format!("/channels/{}", id)))
            .and(body_json(json!({ "name": name })))
            .respond_with(|req: &Request| {
                let body: Value = req.body_json().unwrap_or(Value::Null);
                ResponseTemplate::new(200).set_body_json(body)
            })
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn expect_message(&self, id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/channels/{}/messages", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_message_failure(&self, id: &str, status_code: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/channels/{}/messages", id)))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every message posted so far
    pub async fn posted_messages(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == "POST")
            .filter_map(|req| req.body_json::<Value>().ok())
            .collect()
    }
}
