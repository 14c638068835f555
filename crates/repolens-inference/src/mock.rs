//! Scripted generation backend for deterministic testing.
//!
//! Every (model, protocol version) pair can be scripted with one outcome.
//! Unscripted pairs answer with a model-unusable error, mirroring a 404 from
//! the real API. Listing returns whatever was registered per version.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repolens_inference::mock::{MockBackend, Scripted};
//!
//! let backend = MockBackend::new()
//!     .with_models("v1beta", &["gemini-2.0-flash"])
//!     .script("gemini-2.0-flash", "v1beta", Scripted::text("## STACK\n- Rust"));
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use repolens_core::{
    CandidateBackend, Error, FinishReason, GeneratedDocument, GenerationRequest, ModelLister,
    ReportBackend, Result,
};

/// One scripted outcome.
#[derive(Debug)]
pub enum Scripted {
    Document(GeneratedDocument),
    Error(Error),
}

impl Scripted {
    /// A normally completed document.
    pub fn text(text: impl Into<String>) -> Self {
        Self::document(text, FinishReason::Stop)
    }

    pub fn document(text: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self::Document(GeneratedDocument {
            text: text.into(),
            finish_reason,
        })
    }

    pub fn error(error: Error) -> Self {
        Self::Error(error)
    }
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub operation: String,
    pub target: String,
}

/// Scripted lister and report backend.
#[derive(Default)]
pub struct MockBackend {
    listings: HashMap<String, Vec<String>>,
    scripts: Mutex<HashMap<String, Scripted>>,
    requests: Mutex<Vec<GenerationRequest>>,
    call_log: Mutex<Vec<MockCall>>,
    latency: Option<Duration>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the models listed for a protocol version.
    pub fn with_models(mut self, api_version: &str, models: &[&str]) -> Self {
        self.listings.insert(
            api_version.to_string(),
            models.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    /// Script the outcome of one (model, version) pair. Consumed on first use.
    pub fn script(self, model: &str, api_version: &str, outcome: Scripted) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(CandidateBackend::new(model, api_version).to_string(), outcome);
        self
    }

    /// Delay every generation call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// `model@version` of every generation call, in order.
    pub fn generate_calls(&self) -> Vec<String> {
        self.calls_for("generate")
    }

    /// Versions listed, in order.
    pub fn list_calls(&self) -> Vec<String> {
        self.calls_for("list_models")
    }

    /// Requests received by `generate`, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn calls_for(&self, operation: &str) -> Vec<String> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.target.clone())
            .collect()
    }

    fn log_call(&self, operation: &str, target: String) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            target,
        });
    }
}

#[async_trait]
impl ModelLister for MockBackend {
    async fn list_models(&self, api_version: &str) -> Result<Vec<String>> {
        self.log_call("list_models", api_version.to_string());
        Ok(self.listings.get(api_version).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ReportBackend for MockBackend {
    async fn generate(
        &self,
        candidate: &CandidateBackend,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocument> {
        let key = candidate.to_string();
        self.log_call("generate", key.clone());
        self.requests.lock().unwrap().push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let scripted = self.scripts.lock().unwrap().remove(&key);
        match scripted {
            Some(Scripted::Document(doc)) => Ok(doc),
            Some(Scripted::Error(err)) => Err(err),
            None => Err(Error::ModelUnusable {
                model: candidate.model.clone(),
                api_version: candidate.api_version.clone(),
                reason: "not found".to_string(),
            }),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
