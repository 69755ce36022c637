//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{self, AutoTagRequest, AutoTagResponse, PaletteResponse};
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{OpenAiTagSuggester, PaletteOverrides, PaletteService, TagSuggester};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub palettes: Arc<PaletteService>,
    /// `None` when no API key is configured
    pub tagger: Option<Arc<dyn TagSuggester>>,
}

impl AppState {
    /// Replace the tag suggester
    pub fn with_tagger(mut self, tagger: Arc<dyn TagSuggester>) -> Self {
        self.tagger = Some(tagger);
        self
    }
}

/// Create application state from a loaded configuration.
///
/// The tag suggester is enabled only when `OPENAI_API_KEY` is set.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let tagger: Option<Arc<dyn TagSuggester>> =
        match OpenAiTagSuggester::from_env(config.tagging.clone()) {
            Some(suggester) => Some(Arc::new(suggester.map_err(|e| {
                anyhow::anyhow!("Failed to create tag suggester: {e}")
            })?)),
            None => {
                tracing::info!("OPENAI_API_KEY not set, auto-tagging disabled");
                None
            }
        };

    Ok(create_app_state_with_tagger(config, tagger))
}

/// Create application state with an explicit tag suggester (or none).
pub fn create_app_state_with_tagger(
    config: AppConfig,
    tagger: Option<Arc<dyn TagSuggester>>,
) -> AppState {
    let palettes = Arc::new(
        PaletteService::new(config.palette_options()).with_max_pixels(config.upload.max_pixels),
    );

    AppState {
        config: Arc::new(config),
        palettes,
        tagger,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let max_bytes = state.config.upload.max_bytes;

    Router::new()
        .route(
            "/api/palette",
            post(handle_palette).layer(DefaultBodyLimit::max(max_bytes)),
        )
        .route("/api/auto-tag", post(handle_auto_tag))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_palette(
    State(state): State<AppState>,
    overrides: Result<Query<PaletteOverrides>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PaletteResponse>, ApiError> {
    api::handle_palette(
        State(state.palettes),
        State(state.config),
        overrides,
        body,
    )
    .await
}

async fn handle_auto_tag(
    State(state): State<AppState>,
    payload: Result<Json<AutoTagRequest>, JsonRejection>,
) -> Result<Json<AutoTagResponse>, ApiError> {
    api::handle_auto_tag(State(state.tagger), payload).await
}
