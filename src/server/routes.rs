//! Request handlers
//!
//! Form endpoints mirror the browser flow; /api/diagnose is the JSON
//! mirror of /predict. Collaborator failures surface as 500 with a
//! short message while the full error goes to the log.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::export;
use crate::orchestrator::TriageReport;
use crate::server::{views, AppState};

/// Form body for POST /predict
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    /// Free-text symptom description; a missing field counts as empty
    #[serde(default)]
    pub symptoms: String,
}

/// Form body for POST /download_pdf
#[derive(Debug, Deserialize)]
pub struct PdfForm {
    #[serde(default)]
    pub summary: String,
}

/// JSON body for POST /api/diagnose
#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    #[serde(default)]
    pub symptoms: String,
}

/// Health probe payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub known_symptoms: usize,
}

/// GET / - empty input form with the known keywords
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(views::render_index(state.orchestrator.knowledge(), None))
}

/// POST /predict - run triage and render the report into the page
pub async fn predict(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    info!("User input: {}", form.symptoms);

    match state.orchestrator.triage(&form.symptoms).await {
        Ok(report) => {
            info!(
                "Request {} matched {} result(s)",
                report.request_id,
                report.results.len()
            );
            Ok(Html(views::render_index(
                state.orchestrator.knowledge(),
                Some(&report),
            )))
        }
        Err(e) => {
            error!("Triage failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Triage failed, see server log".to_string(),
            ))
        }
    }
}

/// POST /download_pdf - export the submitted summary as a PDF attachment
pub async fn download_pdf(
    Form(form): Form<PdfForm>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match export::render_summary(&form.summary) {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export::PDF_FILENAME),
                ),
            ],
            bytes,
        )),
        Err(e) => {
            error!("PDF export failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "PDF export failed, see server log".to_string(),
            ))
        }
    }
}

/// POST /api/diagnose - machine-readable mirror of /predict
pub async fn api_diagnose(
    State(state): State<AppState>,
    Json(request): Json<DiagnoseRequest>,
) -> Result<Json<TriageReport>, (StatusCode, String)> {
    info!("API input: {}", request.symptoms);

    match state.orchestrator.triage(&request.symptoms).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            error!("Triage failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Triage failed, see server log".to_string(),
            ))
        }
    }
}

/// GET /health - liveness and basic service facts
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        known_symptoms: state.orchestrator.knowledge().len(),
    })
}
