//! Section splitting.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use tracing::debug;

use repolens_core::{ReportLanguage, SectionClassifier, SectionKey};

use crate::body::SectionBody;

static CLASSIFIER: Lazy<SectionClassifier> = Lazy::new(SectionClassifier::standard);

/// What a section is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionLabel {
    /// One of the six report sections.
    Known(SectionKey),
    /// A marked header that did not classify, as an upper-case normalized label.
    Derived(String),
}

impl SectionLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(key) => key.as_str(),
            Self::Derived(label) => label,
        }
    }

    pub fn key(&self) -> Option<SectionKey> {
        match self {
            Self::Known(key) => Some(*key),
            Self::Derived(_) => None,
        }
    }

    /// Display title in the given language; derived labels read as words.
    pub fn title(&self, language: ReportLanguage) -> String {
        match self {
            Self::Known(key) => key.title(language).to_string(),
            Self::Derived(label) => label.replace('_', " "),
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One renderable section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSection {
    #[serde(rename = "key")]
    pub label: SectionLabel,
    /// Raw text between this header and the next, trimmed.
    pub content: String,
    pub body: SectionBody,
}

impl RenderSection {
    fn new(label: SectionLabel, content: String) -> Self {
        let body = SectionBody::from_content(&content);
        Self {
            label,
            content,
            body,
        }
    }
}

/// Split a final report into renderable sections.
///
/// Only headings and whole-line bold labels open a section; bare and
/// numbered labels are body content here. Sections whose content is empty
/// are skipped. Text with no header at all, or whose headers all have empty
/// bodies, becomes a single architectural-summary section.
pub fn parse(text: &str) -> Vec<RenderSection> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut current: Option<(SectionLabel, Vec<&str>)> = None;
    let mut headers = 0usize;

    for line in text.lines() {
        match CLASSIFIER.detect_marked(line) {
            Some(detected) => {
                headers += 1;
                if let Some((label, lines)) = current.take() {
                    push_section(&mut sections, label, &lines);
                }
                let label = match detected.key {
                    Some(key) => SectionLabel::Known(key),
                    None => SectionLabel::Derived(detected.header.derived_label()),
                };
                current = Some((label, Vec::new()));
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((label, lines)) = current {
        push_section(&mut sections, label, &lines);
    }

    if sections.is_empty() {
        return vec![RenderSection::new(
            SectionLabel::Known(SectionKey::ArchitecturalSummary),
            text.trim().to_string(),
        )];
    }

    debug!(
        subsystem = "render",
        headers,
        sections = sections.len(),
        "Parsed report sections"
    );
    sections
}

fn push_section(sections: &mut Vec<RenderSection>, label: SectionLabel, lines: &[&str]) {
    let content = lines.join("\n").trim().to_string();
    if !content.is_empty() {
        sections.push(RenderSection::new(label, content));
    }
}
