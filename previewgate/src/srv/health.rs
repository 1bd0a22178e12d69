//! Health aggregator (§4.8): reports on the two optional upstreams and
//! gates readiness on the document converter only when documents are
//! enabled for this instance.

use std::time::Duration;

use actix_web::{get, web, HttpResponse};
use previewgate_core::PipelineError;
use serde::Serialize;

use crate::dispatch::AppState;
use crate::error::ApiError;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct DependencyStatus {
    name: &'static str,
    r#type: &'static str,
    ready: bool,
    live: bool,
}

#[derive(Serialize)]
struct HealthReport {
    ready: bool,
    dependencies: Vec<DependencyStatus>,
}

async fn probe(client: &reqwest::Client, url: &str) -> bool {
    client
        .get(url)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await
        .map(|resp| resp.status().is_success())
        .unwrap_or(false)
}

#[get("/")]
pub async fn report(state: web::Data<AppState>) -> HttpResponse {
    let storage_ready = probe(&state.http, &state.storage_health_url()).await;
    let converter_ready = probe(&state.http, &state.converter_health_url()).await;

    HttpResponse::Ok().json(HealthReport {
        ready: true,
        dependencies: vec![
            DependencyStatus {
                name: "storage",
                r#type: "OPTIONAL",
                ready: storage_ready,
                live: storage_ready,
            },
            DependencyStatus {
                name: "document-converter",
                r#type: "OPTIONAL",
                ready: converter_ready,
                live: converter_ready,
            },
        ],
    })
}

/// 200 when documents are disabled entirely for this instance, or when
/// the converter answers; 429 otherwise.
#[get("/ready/")]
pub async fn ready(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    if !state.documents_enabled() {
        return Ok(HttpResponse::Ok().finish());
    }
    if probe(&state.http, &state.converter_health_url()).await {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(ApiError(PipelineError::DocsEditorUnavailable))
    }
}

#[get("/live/")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().finish()
}
