//! Backend candidate resolution.
//!
//! Produces the ordered list of (model, protocol version) pairs the
//! generation loop walks:
//!
//! 1. The explicitly configured model, if any
//! 2. Models discovered from the first protocol version whose listing
//!    endpoint returns at least one generation-capable model
//! 3. The static fallback list
//!
//! Duplicates (by model identifier) keep their first occurrence. Discovery
//! failures are logged and skipped; resolution never fails.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use repolens_core::{CandidateBackend, ModelLister};

use crate::config::ReportConfig;

/// Candidate resolver settings.
#[derive(Debug, Clone)]
pub struct CandidateResolver {
    preferred_model: Option<String>,
    api_versions: Vec<String>,
    fallback_models: Vec<String>,
}

impl CandidateResolver {
    pub fn new(
        preferred_model: Option<String>,
        api_versions: Vec<String>,
        fallback_models: Vec<String>,
    ) -> Self {
        Self {
            preferred_model,
            api_versions,
            fallback_models,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.preferred_model.clone(),
            config.api_versions.clone(),
            config.fallback_models.clone(),
        )
    }

    /// Protocol versions in preference order.
    pub fn api_versions(&self) -> &[String] {
        &self.api_versions
    }

    fn primary_version(&self) -> &str {
        self.api_versions
            .first()
            .map(String::as_str)
            .unwrap_or(repolens_core::defaults::API_VERSIONS[0])
    }

    /// Query each protocol version's listing endpoint until one yields models.
    async fn discover(&self, lister: &dyn ModelLister) -> Vec<CandidateBackend> {
        for version in &self.api_versions {
            match lister.list_models(version).await {
                Ok(models) if !models.is_empty() => {
                    debug!(api_version = %version, count = models.len(), "Discovered models");
                    return models
                        .into_iter()
                        .map(|model| CandidateBackend::new(model, version.as_str()))
                        .collect();
                }
                Ok(_) => {
                    debug!(api_version = %version, "No generation models listed");
                }
                Err(e) => {
                    warn!(api_version = %version, error = %e, "Model discovery failed");
                }
            }
        }
        Vec::new()
    }

    /// Resolve the ordered, de-duplicated candidate list.
    #[instrument(skip(self, lister), fields(subsystem = "inference", component = "resolver", op = "resolve"))]
    pub async fn resolve(&self, lister: &dyn ModelLister) -> Vec<CandidateBackend> {
        let primary = self.primary_version().to_string();

        let configured = self
            .preferred_model
            .iter()
            .filter(|m| !m.trim().is_empty())
            .map(|m| CandidateBackend::new(m.trim(), primary.as_str()));
        let discovered = self.discover(lister).await;
        let fallback = self
            .fallback_models
            .iter()
            .map(|m| CandidateBackend::new(m.as_str(), primary.as_str()));

        let mut seen = HashSet::new();
        let candidates: Vec<CandidateBackend> = configured
            .chain(discovered)
            .chain(fallback)
            .filter(|c| seen.insert(c.model.clone()))
            .collect();

        debug!(
            candidate_count = candidates.len(),
            candidates = ?candidates.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Resolved candidates"
        );
        candidates
    }
}
