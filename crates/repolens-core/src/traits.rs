//! Core traits for repolens abstractions.
//!
//! These traits define the seams between the acquisition pipeline and its
//! providers, so backends can be swapped for scripted doubles in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// GENERATION BACKEND TRAITS
// =============================================================================

/// Lists the models a provider advertises for one protocol version.
#[async_trait]
pub trait ModelLister: Send + Sync {
    /// Return bare model identifiers (no `models/` prefix) that support
    /// report generation on `api_version`.
    async fn list_models(&self, api_version: &str) -> Result<Vec<String>>;
}

/// Produces a report document from a single (model, version) pair.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Run one generation call.
    ///
    /// Per-model failures must surface as [`crate::Error::ModelUnusable`];
    /// anything else aborts the candidate loop.
    async fn generate(
        &self,
        candidate: &CandidateBackend,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocument>;

    /// Provider name for logs.
    fn provider_name(&self) -> &str {
        "generic"
    }
}

// =============================================================================
// METADATA PROVIDER TRAITS
// =============================================================================

/// Fetches a repository snapshot from a code host.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata for a repository URL such as `https://github.com/owner/repo`.
    async fn fetch(&self, reference: &str) -> Result<RepositorySnapshot>;
}
