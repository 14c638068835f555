//! Data model shared by every repolens crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// LANGUAGE
// =============================================================================

/// Natural language the report is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportLanguage {
    #[default]
    English,
    Portuguese,
}

impl ReportLanguage {
    /// Parse a language tag leniently: any `pt` tag is Portuguese, everything else English.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "pt" || tag.starts_with("pt-") || tag.starts_with("pt_") {
            Self::Portuguese
        } else {
            Self::English
        }
    }

    /// Short tag sent to the generation backend.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
        }
    }
}

impl From<String> for ReportLanguage {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<ReportLanguage> for String {
    fn from(lang: ReportLanguage) -> Self {
        lang.tag().to_string()
    }
}

impl fmt::Display for ReportLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// REPOSITORY SNAPSHOT
// =============================================================================

/// Immutable metadata about a remote repository, as fetched by a metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// Language name → byte count.
    pub languages: BTreeMap<String, u64>,
    pub topics: Vec<String>,
    pub license: Option<String>,
    /// Bounded README excerpt.
    pub readme_excerpt: String,
    /// Bounded file-tree excerpt, one entry per line.
    pub tree_excerpt: String,
}

/// A language with its share of the repository's bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Percentage in 0..=100.
    pub percent: f64,
}

impl LanguageShare {
    /// Percentage rounded to one decimal, e.g. `"62.5"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}", self.percent)
    }
}

impl RepositorySnapshot {
    /// Top `limit` languages by byte share, descending.
    ///
    /// Ties are ordered by name so the result never depends on map order.
    pub fn top_languages(&self, limit: usize) -> Vec<LanguageShare> {
        let total: u64 = self.languages.values().sum();
        let mut entries: Vec<(&String, &u64)> = self.languages.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        entries
            .into_iter()
            .take(limit)
            .map(|(name, bytes)| LanguageShare {
                name: name.clone(),
                bytes: *bytes,
                percent: if total == 0 {
                    0.0
                } else {
                    *bytes as f64 / total as f64 * 100.0
                },
            })
            .collect()
    }
}

// =============================================================================
// CANDIDATES
// =============================================================================

/// A generation target: model identifier plus the protocol version to address it with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateBackend {
    pub model: String,
    pub api_version: String,
}

impl CandidateBackend {
    pub fn new(model: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_version: api_version.into(),
        }
    }

    /// Protocol versions to try for this candidate: its own version first,
    /// then the remaining known versions in preference order.
    pub fn attempt_versions<'a>(&'a self, known: &'a [String]) -> Vec<&'a str> {
        let mut versions = vec![self.api_version.as_str()];
        versions.extend(
            known
                .iter()
                .map(String::as_str)
                .filter(|v| *v != self.api_version),
        );
        versions
    }
}

impl fmt::Display for CandidateBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.model, self.api_version)
    }
}

// =============================================================================
// GENERATION REQUEST / RESPONSE
// =============================================================================

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: crate::defaults::TEMPERATURE,
            top_p: crate::defaults::TOP_P,
            top_k: crate::defaults::TOP_K,
            max_output_tokens: crate::defaults::MAX_OUTPUT_TOKENS,
        }
    }
}

/// One generation request, independent of the candidate it is sent to.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// System instruction; only forwarded by protocol versions that support it.
    pub system_instruction: Option<String>,
    pub language: ReportLanguage,
    pub params: GenerationParams,
}

/// Completion status reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// Normal stop.
    Stop,
    /// Truncated because the output length limit was reached.
    MaxTokens,
    /// Any other provider tag (`SAFETY`, `RECITATION`, ...).
    Other(String),
    /// Provider did not report a status.
    Unspecified,
}

impl FinishReason {
    /// Map a provider tag such as `"STOP"` or `"MAX_TOKENS"`.
    pub fn from_provider(tag: Option<&str>) -> Self {
        match tag {
            None => Self::Unspecified,
            Some("STOP") => Self::Stop,
            Some("MAX_TOKENS") => Self::MaxTokens,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Whether the provider stopped early because of the length limit.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::MaxTokens)
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "STOP"),
            Self::MaxTokens => write!(f, "MAX_TOKENS"),
            Self::Other(tag) => write!(f, "{}", tag),
            Self::Unspecified => write!(f, "UNSPECIFIED"),
        }
    }
}

/// Raw text returned by one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub text: String,
    pub finish_reason: FinishReason,
}

// =============================================================================
// CANONICAL DOCUMENT
// =============================================================================

/// Text whose section headers are exactly `"## " + SectionKey`, each at most once.
///
/// Produced by the canonicalizer or the fallback synthesizer. A document whose
/// raw input had no recognizable header is carried verbatim and scores zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDocument(String);

impl CanonicalDocument {
    /// Wrap text that is already in canonical form.
    pub fn from_canonical(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CanonicalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
