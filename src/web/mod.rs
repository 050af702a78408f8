//! Web API module for KeyStudio.
//!
//! This module exposes the share codec and the option catalog over HTTP so a
//! browser front end can create and open share links.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/layouts` - List supported layouts
//! - `GET /api/options` - List configuration fields and options
//! - `POST /api/share` - Encode a configuration into a share token
//! - `GET /api/share/{token}` - Decode a share token
//! - `GET /api/studio?c=<token>` - Open a Studio session from a token

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cli::catalog::{layout_catalog, option_catalog, FieldInfo, LayoutInfo};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::ConfigModel;
use crate::studio::{ConfigCodec, Notice, ShareLinks, StudioController};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Link builder for the configured origin
    links: Arc<ShareLinks>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let links = ShareLinks::new(&config.share.origin)?;
        Ok(Self {
            config: Arc::new(config),
            links: Arc::new(links),
        })
    }

    fn codec(&self) -> ConfigCodec {
        ConfigCodec::new(self.config.share.max_token_len)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Layout list response.
#[derive(Debug, Serialize)]
pub struct LayoutListResponse {
    /// Supported layouts.
    pub layouts: Vec<LayoutInfo>,
}

/// Option list response.
#[derive(Debug, Serialize)]
pub struct OptionListResponse {
    /// Base fields with their options.
    pub fields: Vec<FieldInfo>,
}

/// Share response.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Encoded configuration.
    pub token: String,
    /// Studio link.
    pub share_link: String,
    /// Build-transfer link.
    pub builder_link: String,
    /// True if per-key overrides did not fit into the token.
    pub overrides_excluded: bool,
}

/// Query parameters of the studio endpoint.
#[derive(Debug, Deserialize)]
pub struct StudioQuery {
    /// Share token.
    pub c: Option<String>,
}

/// Studio session response.
#[derive(Debug, Serialize)]
pub struct StudioResponse {
    /// Configuration the session starts with.
    pub config: ConfigModel,
    /// Set when the token could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/layouts - List supported layouts.
async fn list_layouts() -> Json<LayoutListResponse> {
    Json(LayoutListResponse {
        layouts: layout_catalog(),
    })
}

/// GET /api/options - List base fields and their options.
async fn list_options() -> Json<OptionListResponse> {
    Json(OptionListResponse {
        fields: option_catalog(),
    })
}

/// POST /api/share - Encode a configuration.
async fn create_share(
    State(state): State<AppState>,
    Json(model): Json<ConfigModel>,
) -> ApiResult<ShareResponse> {
    model.validate().map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::with_details("Invalid configuration", e.to_string())),
        )
    })?;

    let encoded = state.codec().encode(&model);
    Ok(Json(ShareResponse {
        share_link: state.links.studio_link(&encoded.token),
        builder_link: state.links.builder_link(&encoded.token),
        token: encoded.token.into_string(),
        overrides_excluded: encoded.overrides_excluded,
    }))
}

/// GET /api/share/{token} - Decode a share token.
async fn decode_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<ConfigModel> {
    state.codec().decode(&token).map(Json).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(e.to_string(), e.kind())),
        )
    })
}

/// GET /api/studio?c=<token> - Open a session, falling back to the default.
async fn open_studio(
    State(state): State<AppState>,
    Query(query): Query<StudioQuery>,
) -> ApiResult<StudioResponse> {
    let mut studio = StudioController::new(&state.config).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to start studio session",
                e.to_string(),
            )),
        )
    })?;

    // Decode failures are reported through the notice
    let _ = studio.load_token(query.c.as_deref());
    let notice = studio.take_notices().into_iter().next();

    Ok(Json(StudioResponse {
        config: studio.config().clone(),
        notice,
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Share links are opened from any page, so the API stays open to all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/api/layouts", get(list_layouts))
        .route("/api/options", get(list_options))
        // Share endpoints
        .route("/api/share", post(create_share))
        .route("/api/share/{token}", get(decode_share))
        .route("/api/studio", get(open_studio))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Starting {APP_NAME} web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
