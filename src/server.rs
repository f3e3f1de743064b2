//! HTTP surface: trigger generation and browse the catalog.
//!
//! Thin collaborator over the `app` workflow. Status codes map onto the
//! error taxonomy: structural input problems are 422, engine bugs and I/O
//! are 500, and a run that completes with unfillable slots answers 422
//! listing the gaps (the document is still written).

use crate::app;
use crate::catalog::CategoryBucket;
use crate::config::AppConfig;
use crate::document::UnfillableSlot;
use crate::error::GridcastError;
use crate::storage::PlaylistFile;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub config: AppConfig,
    /// Serializes generation runs so each observes and persists a
    /// consistent rotation state.
    run_lock: tokio::sync::Mutex<()>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            config,
            run_lock: tokio::sync::Mutex::new(()),
        }
    }
}

struct ApiError(GridcastError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GridcastError::InvalidTemplate(_) | GridcastError::InvalidMedia(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            GridcastError::AssemblyInvariantViolation(_)
            | GridcastError::Io(_)
            | GridcastError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

impl From<GridcastError> for ApiError {
    fn from(e: GridcastError) -> Self {
        ApiError(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct VideosResponse {
    video_directory: String,
    total_items: usize,
    categories: Vec<CategoryBucket>,
}

async fn list_videos(State(state): State<Arc<AppState>>) -> Result<Json<VideosResponse>, ApiError> {
    let config = state.config.clone();
    let catalog = tokio::task::spawn_blocking(move || app::scan_catalog(&config))
        .await
        .map_err(|e| GridcastError::Io(std::io::Error::other(e)))??;
    Ok(Json(VideosResponse {
        video_directory: state.config.video_directory.display().to_string(),
        total_items: catalog.len(),
        categories: catalog.buckets().to_vec(),
    }))
}

#[derive(Deserialize)]
struct GenerateParams {
    /// YYYY-MM-DD; defaults to today.
    date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct GenerateResponse {
    message: String,
    playlist_file: String,
    total_items: usize,
    unfillable: Vec<UnfillableSlot>,
    /// The persisted document, in its wire format.
    document: PlaylistFile,
}

async fn generate_playlist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateParams>,
) -> Result<Response, ApiError> {
    let date = params.date.unwrap_or_else(|| Local::now().date_naive());

    let _guard = state.run_lock.lock().await;
    let config = state.config.clone();
    let outcome = tokio::task::spawn_blocking(move || app::generate_for_date(&config, date))
        .await
        .map_err(|e| GridcastError::Io(std::io::Error::other(e)))??;

    let fully_filled = outcome.document.is_fully_filled();
    let body = GenerateResponse {
        message: if fully_filled {
            format!("Playlist generated for {date}")
        } else {
            format!(
                "Playlist generated for {date} with {} unfillable slot(s)",
                outcome.document.unfillable.len()
            )
        },
        playlist_file: outcome.path.display().to_string(),
        total_items: outcome.document.entries.len(),
        unfillable: outcome.document.unfillable.clone(),
        document: PlaylistFile::from_document(&outcome.document, &state.config.channel_name),
    };

    let status = if fully_filled {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(body)).into_response())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/videos", get(list_videos))
        .route("/generate-playlist", post(generate_playlist))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: AppConfig, port: u16) -> Result<(), GridcastError> {
    let state = Arc::new(AppState::new(config));
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
