//! Web server for the game.
//!
//! Serves the HTML pages the players see and a small JSON API for the
//! client-side engine.
//!
//! # Pages
//!
//! - `GET /` - Landing page
//! - `GET /select/` - Mode and level selection
//! - `GET /calibrate/` - Hand tracking calibration
//! - `GET /play/{mode}/{level}/` - Game page with the resolved configuration
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/modes` - List modes
//! - `GET /api/levels` - List levels
//! - `GET /api/config/{mode}/{level}` - Resolved configuration
//! - `GET /api/prompt/{mode}/{level}/{item}` - Spoken prompt for one item
//! - `GET /static/{*path}` - Embedded stylesheets and scripts

pub mod pages;
pub mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::catalog::{Catalog, LevelDefinition};
use crate::config::Config;
use crate::resolver::{ResolvedConfig, SelectionError, INVALID_SELECTION};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    /// Mode and level catalog (immutable after load)
    catalog: Arc<Catalog>,
}

impl AppState {
    /// Creates a new application state around a loaded catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates application state from configuration, loading its catalog.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.load_catalog()?))
    }

    /// Returns the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
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

/// Mode list response.
#[derive(Debug, Serialize)]
pub struct ModeListResponse {
    /// Modes in catalog order.
    pub modes: Vec<ModeSummary>,
}

/// Summary of a mode for the selection screen.
#[derive(Debug, Serialize)]
pub struct ModeSummary {
    /// Mode key used in URLs.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Icon glyph.
    pub icon: String,
}

/// Level list response.
#[derive(Debug, Serialize)]
pub struct LevelListResponse {
    /// Levels in catalog order.
    pub levels: Vec<LevelSummary>,
}

/// A level with its key.
#[derive(Debug, Serialize)]
pub struct LevelSummary {
    /// Level key used in URLs.
    pub key: String,
    /// Level parameters.
    #[serde(flatten)]
    pub level: LevelDefinition,
}

/// Prompt response.
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    /// The item the prompt refers to.
    pub item: String,
    /// Filled audio template.
    pub prompt: String,
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
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        Self::with_details(INVALID_SELECTION, err.to_string())
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Page Handlers
// ============================================================================

/// GET / - Landing page.
async fn home_page() -> Html<String> {
    Html(pages::home())
}

/// GET /select/ - Mode and level selection page.
async fn select_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::select(&state.catalog, None))
}

/// GET /calibrate/ - Hand tracking calibration page.
async fn calibrate_page() -> Html<String> {
    Html(pages::calibrate())
}

/// GET /play/{mode}/{level}/ - Game page.
///
/// An unknown mode or level re-renders the selection page with an error
/// message instead of failing the request.
async fn play_page(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let Path((mode, level)) = match path {
        Ok(path) => path,
        Err(rejection) => {
            warn!("Rejected play URL: {rejection}");
            return Html(pages::select(&state.catalog, Some(INVALID_SELECTION))).into_response();
        }
    };

    let config = match state.catalog.resolve(&mode, &level) {
        Ok(config) => config,
        Err(err) => {
            warn!("Rejected selection {mode}/{level}: {err}");
            return Html(pages::select(&state.catalog, Some(&err.user_message()))).into_response();
        }
    };

    match pages::play(&mode, &level, &config) {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!(
                "Failed to render game page: {}",
                pages::escape_html(&e.to_string())
            )),
        )
            .into_response(),
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/modes - List all modes.
async fn list_modes(State(state): State<AppState>) -> Json<ModeListResponse> {
    let modes = state
        .catalog
        .modes()
        .map(|(key, mode)| ModeSummary {
            key: key.to_string(),
            name: mode.name.clone(),
            description: mode.description.clone(),
            icon: mode.icon.clone(),
        })
        .collect();

    Json(ModeListResponse { modes })
}

/// GET /api/levels - List all levels.
async fn list_levels(State(state): State<AppState>) -> Json<LevelListResponse> {
    let levels = state
        .catalog
        .levels()
        .map(|(key, level)| LevelSummary {
            key: key.to_string(),
            level: level.clone(),
        })
        .collect();

    Json(LevelListResponse { levels })
}

/// GET /api/config/{mode}/{level} - Resolve a selection.
async fn get_config(
    State(state): State<AppState>,
    Path((mode, level)): Path<(String, String)>,
) -> ApiResult<ResolvedConfig> {
    state
        .catalog
        .resolve(&mode, &level)
        .map(Json)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ApiError::from(e))))
}

/// GET /api/prompt/{mode}/{level}/{item} - Spoken prompt for an item.
async fn get_prompt(
    State(state): State<AppState>,
    Path((mode, level, item)): Path<(String, String, String)>,
) -> ApiResult<PromptResponse> {
    let variant = state
        .catalog
        .variant(&mode, &level)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ApiError::from(e))))?;

    let prompt = variant.prompt_for(&item).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!(
                "Item not found in {mode}/{level}: {item}"
            ))),
        )
    })?;

    Ok(Json(PromptResponse { item, prompt }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the router with all pages and endpoints.
pub fn create_router(state: AppState) -> Router {
    // The API is read-only, so any origin may fetch it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(home_page))
        .route("/select", get(select_page))
        .route("/select/", get(select_page))
        .route("/calibrate", get(calibrate_page))
        .route("/calibrate/", get(calibrate_page))
        .route("/play/{mode}/{level}", get(play_page))
        .route("/play/{mode}/{level}/", get(play_page))
        // Health check
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/api/modes", get(list_modes))
        .route("/api/levels", get(list_levels))
        .route("/api/config/{mode}/{level}", get(get_config))
        .route("/api/prompt/{mode}/{level}/{item}", get(get_prompt))
        // Static assets
        .route("/static/{*path}", get(static_files::serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the server fails to start.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr()?;
    let state = AppState::from_config(&config)?;

    info!(
        "Catalog ready: {} modes, {} levels",
        state.catalog.modes().count(),
        state.catalog.levels().count()
    );

    let app = create_router(state);

    info!("Starting web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
