//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use closet::models::AppConfig;
use closet::server::{build_router, create_app_state_with_tagger, AppState};
use closet::services::{OpenAiTagSuggester, TagSuggester};

/// Test application driving the router in-process
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Default configuration, auto-tagging disabled
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Custom configuration, auto-tagging disabled
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(create_app_state_with_tagger(config, None))
    }

    /// Default configuration with the given tag suggester
    pub fn with_tagger(tagger: Arc<dyn TagSuggester>) -> Self {
        Self::build(create_app_state_with_tagger(
            AppConfig::default(),
            Some(tagger),
        ))
    }

    /// Auto-tagging pointed at a mock Responses endpoint
    pub fn with_responses_endpoint(endpoint: String) -> Self {
        let mut config = AppConfig::default();
        config.tagging.endpoint = endpoint;
        config.tagging.timeout_secs = 5;

        let suggester = OpenAiTagSuggester::new("sk-test", config.tagging.clone())
            .expect("Failed to build tag suggester");
        Self::build(create_app_state_with_tagger(
            config,
            Some(Arc::new(suggester)),
        ))
    }

    fn build(state: AppState) -> Self {
        // Build router using shared server module (same as production)
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a raw body
    pub async fn post_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/octet-stream")
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// `palette` array of a palette response
    pub fn palette(&self) -> Vec<String> {
        let json: serde_json::Value = self.json();
        serde_json::from_value(json["palette"].clone()).expect("Expected a palette array")
    }

    /// `tags` array of an auto-tag response
    pub fn tags(&self) -> Vec<String> {
        let json: serde_json::Value = self.json();
        serde_json::from_value(json["tags"].clone()).expect("Expected a tags array")
    }
}
