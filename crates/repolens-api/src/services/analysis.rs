//! Repository analysis: metadata, report generation, fallback, sections.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use repolens_core::{
    CanonicalDocument, Error, MetadataProvider, ReportLanguage, Result, RepositorySnapshot,
};
use repolens_inference::{fallback, score, GeneratedReport, ReportGenerator};
use repolens_render::RenderSection;

/// Where the returned report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    /// A generated document that met the acceptance threshold.
    Model,
    /// The best incomplete generated document.
    Partial,
    /// Synthesized from metadata alone.
    Fallback,
}

/// Result of one analysis request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub analysis: CanonicalDocument,
    pub sections: Vec<RenderSection>,
    pub source: ReportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Reason code when `source` is `fallback`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub score: usize,
}

impl Analysis {
    fn generated(report: GeneratedReport) -> Self {
        let sections = repolens_render::parse(report.document.as_str());
        Self {
            source: if report.partial {
                ReportSource::Partial
            } else {
                ReportSource::Model
            },
            sections,
            model: Some(report.model),
            api_version: Some(report.api_version),
            fallback_reason: None,
            score: report.score,
            analysis: report.document,
        }
    }

    fn fallback(snapshot: &RepositorySnapshot, reason: String, language: ReportLanguage) -> Self {
        let document = fallback::synthesize(snapshot, &reason, language);
        Self {
            sections: repolens_render::parse(document.as_str()),
            score: score(document.as_str()),
            source: ReportSource::Fallback,
            model: None,
            api_version: None,
            fallback_reason: Some(reason),
            analysis: document,
        }
    }
}

/// Analysis pipeline shared by every request.
pub struct AnalysisService {
    metadata: Arc<dyn MetadataProvider>,
    generator: ReportGenerator,
}

impl AnalysisService {
    pub fn new(metadata: Arc<dyn MetadataProvider>, generator: ReportGenerator) -> Self {
        Self {
            metadata,
            generator,
        }
    }

    /// Analyze a repository.
    ///
    /// Metadata failures are returned as errors. Once a snapshot exists, any
    /// generation failure other than cancellation yields a fallback report.
    #[instrument(skip(self, language, cancel), fields(subsystem = "api", component = "analysis", op = "analyze", language = %language))]
    pub async fn analyze(
        &self,
        reference: &str,
        language: ReportLanguage,
        cancel: &CancellationToken,
    ) -> Result<Analysis> {
        let start = Instant::now();
        let snapshot = self.metadata.fetch(reference).await?;

        let analysis = match self.generator.generate(&snapshot, language, cancel).await {
            Ok(report) => Analysis::generated(report),
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                let reason = e.reason_code();
                warn!(
                    repository = %snapshot.name,
                    error = %e,
                    fallback_reason = %reason,
                    "Generation failed, returning fallback report"
                );
                Analysis::fallback(&snapshot, reason, language)
            }
        };

        info!(
            repository = %snapshot.name,
            source = ?analysis.source,
            sections = analysis.score,
            duration_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(analysis)
    }
}
