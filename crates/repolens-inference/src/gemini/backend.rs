//! Generative Language API backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use repolens_core::defaults::GENERATION_METHOD;
use repolens_core::{
    CandidateBackend, Error, FinishReason, GeneratedDocument, GenerationRequest, ModelLister,
    ReportBackend, Result,
};

use super::error::{from_response, from_transport};
use super::types::*;
use crate::config::ReportConfig;

/// Only this protocol version accepts a `systemInstruction` field.
pub const SYSTEM_INSTRUCTION_VERSION: &str = "v1beta";

/// Generative Language API backend.
///
/// Serves both model listing and report generation. The API key travels as
/// the `key` query parameter.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiBackend {
    /// Create a backend from configuration.
    ///
    /// A missing API key is not an error here; every call reports
    /// [`Error::Config`] instead so the caller can fall back.
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "gemini",
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            has_api_key = config.has_api_key(),
            "Initializing generation backend"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = ReportConfig::from_env()?;
        Self::new(&config)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::Config("GEMINI_API_KEY is not configured".to_string())
        })
    }

    fn url(&self, api_version: &str, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, api_version, path)
    }

    /// Build the request body for one (candidate, version) pair.
    pub fn build_body(candidate: &CandidateBackend, request: &GenerationRequest) -> GenerateContentRequest {
        let system_instruction = match request.system_instruction.as_deref() {
            Some(text) if candidate.api_version == SYSTEM_INSTRUCTION_VERSION => {
                Some(Content::instruction(text))
            }
            _ => None,
        };

        GenerateContentRequest {
            contents: vec![Content::user(request.prompt.as_str())],
            system_instruction,
            generation_config: request.params.into(),
        }
    }

    async fn error_body(response: Response) -> GeminiError {
        response
            .json::<GeminiErrorResponse>()
            .await
            .map(|r| r.error)
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelLister for GeminiBackend {
    #[instrument(skip(self), fields(subsystem = "inference", component = "gemini", op = "list_models"))]
    async fn list_models(&self, api_version: &str) -> Result<Vec<String>> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(self.url(api_version, "models"))
            .query(&[("key", key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = Self::error_body(response).await;
            return Err(Error::Upstream {
                kind: super::error::upstream_kind(status, &body),
                status: Some(status),
                provider_status: body.status,
                message: body.message,
            });
        }

        let listing: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse model listing: {}", e)))?;

        let models: Vec<String> = listing
            .models
            .iter()
            .filter(|m| m.supports(GENERATION_METHOD))
            .map(|m| m.model_id().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        debug!(count = models.len(), "Listed generation models");
        Ok(models)
    }
}

#[async_trait]
impl ReportBackend for GeminiBackend {
    #[instrument(
        skip(self, request),
        fields(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            model = %candidate.model,
            api_version = %candidate.api_version,
            prompt_len = request.prompt.len()
        )
    )]
    async fn generate(
        &self,
        candidate: &CandidateBackend,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocument> {
        let key = self.api_key()?;
        let start = Instant::now();

        let path = format!("models/{}:generateContent", candidate.model);
        let body = Self::build_body(candidate, request);

        let response = self
            .client
            .post(self.url(&candidate.api_version, &path))
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| from_transport(e, candidate))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = Self::error_body(response).await;
            return Err(from_response(status, body, candidate));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    from_transport(e, candidate)
                } else {
                    Error::Serialization(format!("Failed to parse response: {}", e))
                }
            })?;

        if result.candidates.is_empty() {
            if let Some(reason) = result
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                warn!(block_reason = reason, "Prompt blocked by provider");
            }
        }

        let text = result.first_text();
        let finish_reason = FinishReason::from_provider(result.first_finish_reason());
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = text.len(),
            finish_reason = %finish_reason,
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > self.timeout.as_millis() as u64 / 2 {
            warn!(duration_ms = elapsed, slow = true, "Slow generation operation");
        }

        Ok(GeneratedDocument {
            text,
            finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
