//! Generative Language API error classification.
//!
//! Splits provider failures into the two classes the candidate loop cares
//! about: per-model conditions (advance to the next pair) and blocking
//! conditions (abort).

use repolens_core::{CandidateBackend, Error, UpstreamKind};

use super::types::GeminiError;

/// Whether an error response means "this model cannot serve this request".
pub fn is_model_not_found(status: u16, body: &GeminiError) -> bool {
    let message = body.message.to_lowercase();
    status == 404
        || body.code == Some(404)
        || message.contains("not found")
        || message.contains("not supported")
}

/// Blocking failure class for an error response.
pub fn upstream_kind(status: u16, body: &GeminiError) -> UpstreamKind {
    match body.status.as_deref() {
        Some("RESOURCE_EXHAUSTED") => return UpstreamKind::QuotaExceeded,
        Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED") => return UpstreamKind::Unauthorized,
        Some("INVALID_ARGUMENT") | Some("FAILED_PRECONDITION") => {
            return UpstreamKind::InvalidRequest
        }
        _ => {}
    }

    if body.message.to_lowercase().contains("quota") {
        return UpstreamKind::QuotaExceeded;
    }

    UpstreamKind::from_status(status)
}

/// Convert a non-2xx response to a repolens Error.
pub fn from_response(status: u16, body: GeminiError, candidate: &CandidateBackend) -> Error {
    if is_model_not_found(status, &body) {
        return Error::ModelUnusable {
            model: candidate.model.clone(),
            api_version: candidate.api_version.clone(),
            reason: if body.message.is_empty() {
                format!("HTTP {}", status)
            } else {
                body.message
            },
        };
    }

    let kind = upstream_kind(status, &body);
    let message = if body.message.is_empty() {
        format!("Generation API returned {}", status)
    } else {
        body.message
    };

    Error::Upstream {
        kind,
        status: Some(status),
        provider_status: body.status,
        message,
    }
}

/// Convert a transport failure to a repolens Error.
///
/// A timeout is a per-model condition; anything else is blocking.
pub fn from_transport(err: reqwest::Error, candidate: &CandidateBackend) -> Error {
    if err.is_timeout() {
        return Error::ModelUnusable {
            model: candidate.model.clone(),
            api_version: candidate.api_version.clone(),
            reason: "request timed out".to_string(),
        };
    }

    Error::Upstream {
        kind: UpstreamKind::Transport,
        status: None,
        provider_status: None,
        message: err.to_string(),
    }
}
