//! Mock of the language-model Responses API.

use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const RESPONSES_PATH: &str = "/v1/responses";

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockResponsesServer {
    pub server: MockServer,
}

impl MockResponsesServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Full URL of the Responses endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), RESPONSES_PATH)
    }

    /// Reply with `text` as the first output text block
    pub async fn mock_reply_text(&self, text: &str) {
        let body = json!({
            "id": "resp_test",
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "output_text", "text": text }],
            }],
        });

        Mock::given(method("POST"))
            .and(path(RESPONSES_PATH))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Reply with an arbitrary JSON body
    pub async fn mock_reply_json(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(RESPONSES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Reply with an error status and OpenAI-style error body
    pub async fn mock_error(&self, status: u16, message: &str) {
        let body = json!({ "error": { "message": message, "type": "invalid_request_error" } });

        Mock::given(method("POST"))
            .and(path(RESPONSES_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all requests received so far
    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("Request body should be JSON"))
            .collect()
    }
}
