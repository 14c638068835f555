//! Error types for repolens.

use std::fmt;

use thiserror::Error;

/// Result type alias using repolens' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Class of a blocking upstream failure.
///
/// These are not per-model conditions: trying another model cannot fix them,
/// so the candidate loop aborts as soon as one is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Credential rejected (401/403).
    Unauthorized,
    /// Quota exhausted or rate limited (429, `RESOURCE_EXHAUSTED`).
    QuotaExceeded,
    /// Request malformed or too large (400).
    InvalidRequest,
    /// Service unavailable or internal failure (5xx).
    Unavailable,
    /// Connection could not be established or was reset.
    Transport,
    /// Anything else the provider returned.
    Other,
}

impl UpstreamKind {
    /// Classify a provider HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            429 => Self::QuotaExceeded,
            400 | 413 | 422 => Self::InvalidRequest,
            500..=599 => Self::Unavailable,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::QuotaExceeded => write!(f, "quota exceeded"),
            Self::InvalidRequest => write!(f, "invalid request"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Transport => write!(f, "transport"),
            Self::Other => write!(f, "upstream"),
        }
    }
}

/// Core error type for repolens operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable credential or invalid configuration. Fatal, never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A specific model/protocol-version pair cannot serve the request.
    #[error("Model {model} unusable on {api_version}: {reason}")]
    ModelUnusable {
        model: String,
        api_version: String,
        reason: String,
    },

    /// Blocking upstream failure (quota, auth, malformed request, ...).
    #[error("Upstream {kind} error{}: {message}", status_suffix(.status))]
    Upstream {
        kind: UpstreamKind,
        /// HTTP status, if the provider answered.
        status: Option<u16>,
        /// Provider status tag such as `RESOURCE_EXHAUSTED`.
        provider_status: Option<String>,
        message: String,
    },

    /// Every candidate was exhausted without retaining any error or document.
    #[error("No generation backend available")]
    NoBackendAvailable,

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// Repository (or other resource) not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Metadata provider rate limit hit.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Repository reference could not be parsed.
    #[error("Invalid repository reference: {0}")]
    InvalidReference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl Error {
    /// Whether the candidate loop may advance to the next (model, version) pair.
    pub fn is_model_unusable(&self) -> bool {
        matches!(self, Error::ModelUnusable { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => *status,
            Error::ModelUnusable { .. } | Error::NotFound(_) => Some(404),
            Error::RateLimited(_) => Some(429),
            Error::InvalidReference(_) => Some(400),
            Error::Config(_) | Error::NoBackendAvailable | Error::Internal(_) => Some(500),
            _ => None,
        }
    }

    /// Short reason code used in fallback reports.
    ///
    /// Prefers the provider's status tag, then the HTTP status, then the message.
    pub fn reason_code(&self) -> String {
        if let Error::Upstream {
            provider_status: Some(tag),
            ..
        } = self
        {
            return tag.clone();
        }
        match self.status() {
            Some(status) => status.to_string(),
            None => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
