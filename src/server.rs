//! HTTP boundary for the live board.
//!
//! Three dashboard routes serving one static HTML asset, one JSON API route
//! that rebuilds the board from disk on every request, and a JSON 404 for
//! everything else. All domain logic lives in [`crate::board`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use thiserror::Error;

use crate::board::build_board;
use crate::config::{BoardConfig, DASHBOARD_FILE};

/// Configuration for the board server.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub board: BoardConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4173,
            board: BoardConfig::from_workspace(PathBuf::from(".")),
        }
    }
}

/// Shared application state. Requests share nothing mutable; every board
/// request re-reads the artifact tree from scratch.
pub struct AppState {
    pub board: BoardConfig,
}

pub type SharedState = Arc<AppState>;

#[derive(Deserialize)]
pub struct BoardQuery {
    /// Optional artifact-root override, absolute or workspace-relative.
    pub output: Option<String>,
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────

/// Build the application router with the dashboard and API routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/index.html", get(serve_dashboard))
        .route(&format!("/{}", DASHBOARD_FILE), get(serve_dashboard))
        .route("/api/board", get(api_board))
        .fallback(not_found)
        .with_state(state)
}

/// Serve the dashboard HTML asset, read from disk on every request.
async fn serve_dashboard(State(state): State<SharedState>) -> Response {
    let html = crate::board::read_text(&state.board.dashboard_file);
    if html.is_empty() {
        tracing::warn!(
            path = %state.board.dashboard_file.display(),
            "dashboard asset missing"
        );
        return (
            StatusCode::NOT_FOUND,
            Html("<h1>Dashboard file not found</h1>".to_string()),
        )
            .into_response();
    }
    Html(html).into_response()
}

/// Rebuild and return the board snapshot.
async fn api_board(
    State(state): State<SharedState>,
    Query(query): Query<BoardQuery>,
) -> impl IntoResponse {
    let output_dir = state.board.resolve_output(query.output.as_deref());
    tracing::debug!(output = %output_dir.display(), "building board");
    let snapshot = build_board(&state.board, &output_dir);
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(snapshot),
    )
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

// ── Server loop ───────────────────────────────────────────────────────

/// Bind and serve until ctrl-c.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState {
        board: config.board,
    });
    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    let local_addr = listener.local_addr()?;

    println!("BMAD live board running at http://{}", local_addr);
    println!("Dashboard URL: http://{}/{}", local_addr, DASHBOARD_FILE);
    println!(
        "Default BMAD output path: {}",
        state.board.default_output.display()
    );
    println!("Press Ctrl+C to stop.");
    tracing::info!(%local_addr, "board server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    println!("\nShutting down...");
}
