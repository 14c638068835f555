//! Report generation over the resolved candidate list.
//!
//! Each (model, protocol version) pair gets exactly one request. Every text
//! response is canonicalized and scored; the best-scoring document so far is
//! kept in an [`AttemptLedger`]. The loop stops at the first document the
//! [`AcceptancePolicy`] accepts, or at the first blocking error.
//!
//! | Attempt outcome                  | Effect                                  |
//! |----------------------------------|-----------------------------------------|
//! | Accepted document                | Return it                               |
//! | Incomplete or truncated document | Keep if best so far, continue           |
//! | Empty response                   | Continue                                |
//! | `ModelUnusable`                  | Remember as last error, continue        |
//! | Any other error                  | Abort and propagate                     |
//!
//! After exhaustion the best partial result is returned if it meets the
//! partial floor; otherwise the last model-unusable error, otherwise
//! [`Error::NoBackendAvailable`].

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use repolens_core::{
    CandidateBackend, CanonicalDocument, Error, GeneratedDocument, GenerationParams,
    GenerationRequest, ModelLister, ReportBackend, ReportLanguage, RepositorySnapshot, Result,
};

use crate::canonicalize::canonicalize;
use crate::completeness::score;
use crate::config::{AcceptancePolicy, ReportConfig};
use crate::gemini::GeminiBackend;
use crate::prompt;
use crate::resolver::CandidateResolver;

/// A canonical report together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedReport {
    pub document: CanonicalDocument,
    pub model: String,
    pub api_version: String,
    /// Distinct canonical sections present.
    pub score: usize,
    /// True when returned as the best partial result after exhaustion.
    pub partial: bool,
}

/// Accumulator folded over the attempt plan.
#[derive(Debug)]
pub struct AttemptLedger {
    policy: AcceptancePolicy,
    best: Option<GeneratedReport>,
    last_error: Option<Error>,
    attempts: usize,
}

impl AttemptLedger {
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            policy,
            best: None,
            last_error: None,
            attempts: 0,
        }
    }

    /// Number of outcomes recorded.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Score of the best document so far (0 when none).
    pub fn best_score(&self) -> usize {
        self.best.as_ref().map_or(0, |b| b.score)
    }

    /// Record one attempt. `Break` carries the final outcome of the loop.
    pub fn record(
        &mut self,
        candidate: &CandidateBackend,
        outcome: Result<GeneratedDocument>,
    ) -> ControlFlow<Result<GeneratedReport>> {
        self.attempts += 1;

        let generated = match outcome {
            Ok(generated) => generated,
            Err(e) if e.is_model_unusable() => {
                debug!(candidate = %candidate, error = %e, "Model unusable, trying next");
                self.last_error = Some(e);
                return ControlFlow::Continue(());
            }
            Err(e) => {
                warn!(candidate = %candidate, error = %e, "Blocking upstream error, aborting");
                return ControlFlow::Break(Err(e));
            }
        };

        if generated.text.trim().is_empty() {
            debug!(candidate = %candidate, finish_reason = %generated.finish_reason, "Empty response");
            return ControlFlow::Continue(());
        }

        let document = canonicalize(&generated.text);
        let sections = score(document.as_str());
        let truncated = generated.finish_reason.is_truncated();
        debug!(
            candidate = %candidate,
            sections,
            finish_reason = %generated.finish_reason,
            "Scored document"
        );

        let report = GeneratedReport {
            document,
            model: candidate.model.clone(),
            api_version: candidate.api_version.clone(),
            score: sections,
            partial: false,
        };

        if self.policy.accepts(sections, truncated) {
            return ControlFlow::Break(Ok(report));
        }

        warn!(
            candidate = %candidate,
            sections,
            total = repolens_core::SectionKey::ALL.len(),
            finish_reason = %generated.finish_reason,
            "Incomplete report, trying next candidate"
        );
        if sections > self.best_score() {
            self.best = Some(GeneratedReport {
                partial: true,
                ..report
            });
        }
        ControlFlow::Continue(())
    }

    /// Outcome after every candidate has been tried.
    pub fn finish(self) -> Result<GeneratedReport> {
        match self.best {
            Some(best) if self.policy.keeps_partial(best.score) => {
                warn!(
                    model = %best.model,
                    api_version = %best.api_version,
                    sections = best.score,
                    "Returning best partial result"
                );
                Ok(best)
            }
            _ => Err(self.last_error.unwrap_or(Error::NoBackendAvailable)),
        }
    }
}

/// Resilient report generator.
pub struct ReportGenerator {
    lister: Arc<dyn ModelLister>,
    backend: Arc<dyn ReportBackend>,
    resolver: CandidateResolver,
    policy: AcceptancePolicy,
    params: GenerationParams,
}

impl ReportGenerator {
    pub fn new(
        lister: Arc<dyn ModelLister>,
        backend: Arc<dyn ReportBackend>,
        resolver: CandidateResolver,
        policy: AcceptancePolicy,
    ) -> Self {
        Self {
            lister,
            backend,
            resolver,
            policy,
            params: GenerationParams::default(),
        }
    }

    /// Build a generator backed by the Generative Language API.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let backend = Arc::new(GeminiBackend::new(config)?);
        Ok(Self::new(
            backend.clone(),
            backend,
            CandidateResolver::from_config(config),
            config.acceptance,
        )
        .with_params(config.generation))
    }

    /// Override sampling parameters.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Build the prompt for a snapshot and generate a report.
    #[instrument(
        skip(self, snapshot, cancel),
        fields(subsystem = "inference", component = "generation", op = "generate", repository = %snapshot.name)
    )]
    pub async fn generate(
        &self,
        snapshot: &RepositorySnapshot,
        language: ReportLanguage,
        cancel: &CancellationToken,
    ) -> Result<GeneratedReport> {
        let request = prompt::build_request(snapshot, language, self.params);
        self.generate_with_request(&request, cancel).await
    }

    /// Run the candidate loop for a prepared request.
    pub async fn generate_with_request(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratedReport> {
        let start = Instant::now();

        let candidates = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            candidates = self.resolver.resolve(self.lister.as_ref()) => candidates,
        };
        debug!(
            candidate_count = candidates.len(),
            prompt_len = request.prompt.len(),
            "Starting candidate loop"
        );

        let mut ledger = AttemptLedger::new(self.policy);

        for candidate in &candidates {
            for version in candidate.attempt_versions(self.resolver.api_versions()) {
                let pair = CandidateBackend::new(candidate.model.as_str(), version);

                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!(attempts = ledger.attempts(), "Generation cancelled");
                        return Err(Error::Cancelled);
                    }
                    outcome = self.backend.generate(&pair, request) => outcome,
                };

                if let ControlFlow::Break(result) = ledger.record(&pair, outcome) {
                    if let Ok(report) = &result {
                        info!(
                            model = %report.model,
                            api_version = %report.api_version,
                            sections = report.score,
                            duration_ms = start.elapsed().as_millis() as u64,
                            "Report accepted"
                        );
                    }
                    return result;
                }
            }
        }

        debug!(
            attempts = ledger.attempts(),
            best = ledger.best_score(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Candidates exhausted"
        );
        ledger.finish()
    }
}
