use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{PaletteOverrides, PaletteService};

/// Response from palette extraction
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteResponse {
    /// Lowercase `#rrggbb` swatches, dominant first; empty if the image
    /// could not be read
    #[schema(example = json!(["#c81414", "#1428c8"]))]
    pub palette: Vec<String>,
}

/// Extract a swatch palette
///
/// Send the raw image bytes (PNG, JPEG, WebP or GIF) as the request body.
/// An empty or unreadable body is not an error; it yields an empty palette.
#[utoipa::path(
    post,
    path = "/api/palette",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    params(PaletteOverrides),
    responses(
        (status = 200, description = "Palette extracted", body = PaletteResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 413, description = "Image exceeds the upload limit"),
    ),
    tag = "Palette"
)]
pub async fn handle_palette(
    State(service): State<Arc<PaletteService>>,
    State(config): State<Arc<AppConfig>>,
    overrides: Result<Query<PaletteOverrides>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PaletteResponse>, ApiError> {
    let Query(overrides) = overrides.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let bytes = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                max: config.upload.max_bytes,
            }
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })?;

    let options = service.options(overrides);
    tracing::debug!(
        bytes = bytes.len(),
        max_colors = options.max_colors,
        quality = options.quality,
        "Palette requested"
    );

    let palette = tokio::task::spawn_blocking(move || service.extract(&bytes, &options)).await?;

    Ok(Json(PaletteResponse { palette }))
}
