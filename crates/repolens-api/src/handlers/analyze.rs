//! Repository analysis endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use repolens_core::ReportLanguage;

use crate::services::Analysis;
use crate::{ApiError, AppState};

/// `POST /analyze` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub repo_url: Option<String>,
    /// Report language tag (`en`, `pt`, `pt-BR`); English when absent.
    #[serde(default)]
    pub lang: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    body: Option<Json<AnalyzeRequest>>,
) -> Result<Json<Analysis>, ApiError> {
    let Json(request) = body.unwrap_or_default();
    let language = request
        .lang
        .as_deref()
        .map(ReportLanguage::from_tag)
        .unwrap_or_default();

    let repo_url = match request.repo_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(ApiError::BadRequest("repoUrl is required.".to_string())),
    };
    debug!(repo_url = %repo_url, language = %language, "Analyze request");

    // Cancelled on shutdown; dropping the handler future also drops in-flight calls.
    let cancel = state.shutdown.child_token();
    let analysis = state
        .analysis
        .analyze(&repo_url, language, &cancel)
        .await
        .map_err(|error| ApiError::Analysis { error, language })?;

    Ok(Json(analysis))
}
