//! Wardrobe tag suggestions from a vision-capable language model.
//!
//! The model is asked for JSON, but replies are not trusted to be well
//! formed: [`parse_reply_text`] falls back to scraping the first bracketed
//! list, and [`normalize_tags`] cleans whatever comes out.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::TagError;
use crate::models::TaggingConfig;

/// What the model gets to see about an item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDescription {
    pub image_url: String,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub palette: Vec<String>,
}

/// Source of tag suggestions
#[async_trait]
pub trait TagSuggester: Send + Sync {
    /// Suggest normalized tags for an item
    async fn suggest(&self, item: &ItemDescription) -> Result<Vec<String>, TagError>;
}

/// Tag suggester backed by the OpenAI Responses API
pub struct OpenAiTagSuggester {
    client: reqwest::Client,
    api_key: String,
    config: TaggingConfig,
}

impl OpenAiTagSuggester {
    pub fn new(api_key: impl Into<String>, config: TaggingConfig) -> Result<Self, TagError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Build from `OPENAI_API_KEY`; `None` when the key is unset or blank
    pub fn from_env(config: TaggingConfig) -> Option<Result<Self, TagError>> {
        let key = std::env::var("OPENAI_API_KEY").ok()?;
        if key.trim().is_empty() {
            return None;
        }
        Some(Self::new(key, config))
    }

    fn request_body(&self, item: &ItemDescription) -> Value {
        json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "input": [{
                "role": "user",
                "content": [
                    { "type": "input_text", "text": build_prompt(item) },
                    { "type": "input_image", "image_url": item.image_url },
                ],
            }],
        })
    }
}

#[async_trait]
impl TagSuggester for OpenAiTagSuggester {
    async fn suggest(&self, item: &ItemDescription) -> Result<Vec<String>, TagError> {
        tracing::debug!(
            model = %self.config.model,
            image_url = %item.image_url,
            "Requesting tag suggestions"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(item))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TagError::Status {
                status: status.as_u16(),
                body: upstream_error_message(&body),
            });
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| TagError::MalformedReply(e.to_string()))?;
        let text = reply_text(&reply);

        let tags = normalize_tags(parse_reply_text(text), self.config.max_tags);
        tracing::debug!(count = tags.len(), "Tag suggestions received");
        Ok(tags)
    }
}

/// Prompt sent alongside the image
pub fn build_prompt(item: &ItemDescription) -> String {
    [
        "You are labeling wardrobe items. Return 2-4 concise lowercase tags (no spaces; use hyphens if needed).".to_string(),
        "Prefer: color, garment features, style vibe, seasonality.".to_string(),
        "Avoid duplicates and brand names. JSON only: {\"tags\": [\"...\"]}".to_string(),
        format!("Name: {}", item.name.as_deref().unwrap_or("")),
        format!("Type: {}", item.kind.as_deref().unwrap_or("")),
        format!("Palette (hex): {}", item.palette.join(", ")),
    ]
    .join("\n")
}

/// First text block of a Responses API reply, or `""`
pub fn reply_text(reply: &Value) -> &str {
    reply["output"][0]["content"][0]["text"]
        .as_str()
        .unwrap_or("")
}

fn bracketed() -> &'static Regex {
    static BRACKETED: OnceLock<Regex> = OnceLock::new();
    BRACKETED.get_or_init(|| Regex::new(r"\[([\s\S]*?)\]").expect("static pattern compiles"))
}

/// Raw tag strings from the model's reply text.
///
/// `{"tags": [...]}` is preferred. Anything else that contains a bracketed
/// list is scraped: items split on commas with quotes and whitespace removed.
pub fn parse_reply_text(text: &str) -> Vec<String> {
    if let Ok(parsed) = serde_json::from_str::<Value>(text) {
        return match parsed.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };
    }

    let Some(captures) = bracketed().captures(text) else {
        return Vec::new();
    };
    captures[1]
        .split(',')
        .map(|item| {
            item.chars()
                .filter(|c| !matches!(c, '"' | '\'') && !c.is_whitespace())
                .collect::<String>()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Trim, lowercase, drop empties, de-duplicate (first wins), cap at `max`
pub fn normalize_tags<I>(tags: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || out.contains(&tag) {
            continue;
        }
        if out.len() == max {
            break;
        }
        out.push(tag);
    }
    out
}

/// Best human-readable message from an upstream error body
fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "ai_error".to_string()
            } else {
                body.to_string()
            }
        })
}
