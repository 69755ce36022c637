use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ItemDescription, TagSuggester};

/// Request body for tag suggestion
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoTagRequest {
    /// Publicly reachable URL of the item photo
    #[serde(default)]
    pub image_url: Option<String>,
    /// Item name as entered by the user
    #[serde(default)]
    pub name: Option<String>,
    /// Clothing category, e.g. "tops"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Extracted swatches in `#rrggbb` form
    #[serde(default)]
    pub palette: Vec<String>,
}

/// Suggested tags
#[derive(Debug, Serialize, ToSchema)]
pub struct AutoTagResponse {
    /// Lowercase, de-duplicated tags
    pub tags: Vec<String>,
    /// Set when suggestion failed; `tags` is then empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AutoTagResponse {
    fn tags(tags: Vec<String>) -> Self {
        Self { tags, error: None }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            tags: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Suggest tags for a wardrobe item
///
/// Tagging is best effort: upstream failures come back as `200` with an
/// empty tag list and an `error` message. Only a missing API key is a
/// server error.
#[utoipa::path(
    post,
    path = "/api/auto-tag",
    request_body = AutoTagRequest,
    responses(
        (status = 200, description = "Suggested tags (possibly empty)", body = AutoTagResponse),
        (status = 500, description = "Tagging is not configured"),
    ),
    tag = "Tagging"
)]
pub async fn handle_auto_tag(
    State(tagger): State<Option<Arc<dyn TagSuggester>>>,
    payload: Result<Json<AutoTagRequest>, JsonRejection>,
) -> Result<Json<AutoTagResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "Unreadable auto-tag request");
            return Ok(Json(AutoTagResponse::failed(e.body_text())));
        }
    };

    let tagger = tagger.ok_or(ApiError::NotConfigured("OPENAI_API_KEY"))?;

    let image_url = match request.image_url {
        Some(url) if !url.is_empty() => url,
        _ => return Ok(Json(AutoTagResponse::tags(Vec::new()))),
    };

    let item = ItemDescription {
        image_url,
        name: request.name,
        kind: request.kind,
        palette: request.palette,
    };

    match tagger.suggest(&item).await {
        Ok(tags) => Ok(Json(AutoTagResponse::tags(tags))),
        Err(e) => {
            tracing::warn!(error = %e, "Tag suggestion failed");
            Ok(Json(AutoTagResponse::failed(e)))
        }
    }
}
