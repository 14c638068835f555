//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use repolens_core::{Error, ReportLanguage};

/// Error returned by an API handler.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request; never reaches the pipeline.
    BadRequest(String),
    /// Pipeline failure that could not be turned into a fallback report.
    Analysis {
        error: Error,
        language: ReportLanguage,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

/// Troubleshooting hint for a status code.
pub fn hint(status: u16, language: ReportLanguage) -> Option<&'static str> {
    let hint = match (status, language) {
        (401, ReportLanguage::English) => "Check GEMINI_API_KEY in the server environment.",
        (401, ReportLanguage::Portuguese) => "Verifique GEMINI_API_KEY no ambiente do servidor.",
        (403, ReportLanguage::English) => {
            "Access denied by the API (GitHub or Gemini). Check your credentials."
        }
        (403, ReportLanguage::Portuguese) => {
            "Acesso negado na API (GitHub ou Gemini). Verifique as credenciais."
        }
        (429, ReportLanguage::English) => "Request limit reached. Wait and try again.",
        (429, ReportLanguage::Portuguese) => {
            "Limite de requisições atingido. Aguarde e tente novamente."
        }
        (400, ReportLanguage::English) => {
            "The API request failed (invalid URL, inaccessible repository or prompt too large)."
        }
        (400, ReportLanguage::Portuguese) => {
            "Falha na solicitação para a API (URL inválida, repo inacessível ou prompt muito grande)."
        }
        (404, ReportLanguage::English) => {
            "Repository or Gemini model unavailable. Check the URL, or adjust GEMINI_MODEL."
        }
        (404, ReportLanguage::Portuguese) => {
            "Repositório ou modelo Gemini indisponível. Verifique a URL ou ajuste GEMINI_MODEL."
        }
        _ => return None,
    };
    Some(hint)
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis { error, .. } => error
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) => ErrorBody {
                error: msg,
                details: None,
                hint: None,
            },
            ApiError::Analysis { error, language } => {
                tracing::warn!(status = status.as_u16(), error = %error, "Analysis request failed");
                ErrorBody {
                    error: match language {
                        ReportLanguage::English => "Failed to analyze repository",
                        ReportLanguage::Portuguese => "Erro ao analisar repositório",
                    }
                    .to_string(),
                    details: Some(error.to_string()),
                    hint: hint(status.as_u16(), language),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
