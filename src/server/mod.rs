//! HTTP server module
//!
//! Exposes the symptom checker over HTTP: the web form, the prediction
//! endpoint, PDF download, a JSON API, and a health probe.

pub mod routes;
pub mod views;

use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::Result;
use crate::orchestrator::TriageOrchestrator;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Triage pipeline shared by all requests
    pub orchestrator: Arc<TriageOrchestrator>,

    /// Server start time, reported by the health probe
    pub started_at: Instant,
}

impl AppState {
    /// Create state around an orchestrator
    pub fn new(orchestrator: Arc<TriageOrchestrator>) -> Self {
        Self {
            orchestrator,
            started_at: Instant::now(),
        }
    }
}

/// Assemble the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/predict", post(routes::predict))
        .route("/download_pdf", post(routes::download_pdf))
        .route("/api/diagnose", post(routes::api_diagnose))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until the process stops
pub async fn run(config: &ServerConfig, orchestrator: Arc<TriageOrchestrator>) -> Result<()> {
    let app = build_router(AppState::new(orchestrator));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Symptom checker listening at http://{}", addr);
    info!("Web form: GET /");
    info!("Prediction: POST /predict (form)");
    info!("PDF export: POST /download_pdf (form)");
    info!("JSON API: POST /api/diagnose");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
