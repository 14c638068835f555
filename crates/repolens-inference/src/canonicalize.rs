//! Header canonicalization.
//!
//! Rewrites the loosely formatted headers a model produces (`### 1. Resumo
//! Arquitetural`, `**Pontos Fortes**`, `Stack Tecnológica:`) into the exact
//! `## KEY` form the completeness scorer and the presentation parser expect.
//!
//! Rules:
//! - `---` separator lines are dropped.
//! - Everything before the first classified header is dropped.
//! - Each key is emitted once; later headers for the same key stay as content.
//! - Markdown headings that stay content are rewritten as bold lines, so the
//!   only `## ` lines in the output are canonical.
//! - If nothing classifies, the input is returned verbatim.
//!
//! Canonicalization is idempotent.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::trace;

use repolens_core::{
    is_separator, normalize_label, CanonicalDocument, DetectedHeader, HeaderShape,
    SectionClassifier,
};

static STANDARD: Lazy<Canonicalizer> = Lazy::new(Canonicalizer::default);

/// Canonicalize with the standard classifier.
pub fn canonicalize(raw: &str) -> CanonicalDocument {
    STANDARD.canonicalize(raw)
}

/// Header canonicalizer over a configurable classifier chain.
#[derive(Debug, Default)]
pub struct Canonicalizer {
    classifier: SectionClassifier,
}

impl Canonicalizer {
    pub fn new(classifier: SectionClassifier) -> Self {
        Self { classifier }
    }

    pub fn canonicalize(&self, raw: &str) -> CanonicalDocument {
        let mut used = HashSet::new();
        let mut out: Vec<String> = Vec::new();

        for line in raw.lines() {
            if is_separator(line) {
                continue;
            }

            match self.classifier.detect(line) {
                Some(DetectedHeader {
                    key: Some(key), ..
                }) if used.insert(key) => {
                    trace!(line, key = %key, "Canonical header");
                    out.push(key.canonical_header());
                }
                _ if used.is_empty() => {
                    trace!(line, "Dropping preamble");
                }
                Some(detected) => {
                    trace!(line, key = ?detected.key, "Demoting header to content");
                    out.push(demote(line, &detected));
                }
                None => match demote_stray_heading(line) {
                    Some(demoted) => out.push(demoted),
                    None if is_stray_heading(line) => {}
                    None => out.push(line.to_string()),
                },
            }
        }

        if used.is_empty() {
            return CanonicalDocument::from_canonical(raw);
        }

        CanonicalDocument::from_canonical(out.join("\n").trim())
    }
}

/// Content form of a header that did not become a canonical section.
fn demote(line: &str, detected: &DetectedHeader) -> String {
    match detected.header.shape {
        HeaderShape::Heading(_) => format!("**{}**", detected.header.title),
        _ => line.to_string(),
    }
}

fn is_stray_heading(line: &str) -> bool {
    line.trim_start().starts_with("##")
}

/// Content form of a `##`-prefixed line that is not a detectable header
/// (`## !!!`, `##### Deep dive`).
///
/// Emphasized rather than bolded so the result is never a header candidate.
/// Returns `None` when the line is not such a heading or has no text left.
fn demote_stray_heading(line: &str) -> Option<String> {
    if !is_stray_heading(line) {
        return None;
    }
    let text = line.trim().trim_start_matches('#').trim().trim_matches('*').trim();
    if normalize_label(text).is_empty() {
        None
    } else {
        Some(format!("*{}*", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completeness::score;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_header_styles() {
        let raw = "Here is the analysis!\n\n### 1. Resumo Arquitetural\nA web app.\n\n**Pontos Fortes**\n- Fast\n\n## STACK\n- Rust";
        let doc = canonicalize(raw);
        assert_eq!(
            doc.as_str(),
            "## ARCHITECTURAL_SUMMARY\nA web app.\n\n## STRENGTHS\n- Fast\n\n## STACK\n- Rust"
        );
        assert_eq!(score(doc.as_str()), 3);
    }

    #[test]
    fn test_idempotent() {
        let raw = "intro\n## Visão Geral\ntext\n---\n## Conclusion\nmore\n### Strengths\n- a\n#### Pontos Fortes\n- b\n## !!!\n##### Deep dive\n1. Tarefas\n- c";
        let once = canonicalize(raw);
        let twice = canonicalize(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_key_demoted_to_bold() {
        let raw = "## Strengths\n- a\n### Pontos Fortes\n- b";
        assert_eq!(
            canonicalize(raw).as_str(),
            "## STRENGTHS\n- a\n**Pontos Fortes**\n- b"
        );
    }

    #[test]
    fn test_unrecognized_heading_demoted() {
        let raw = "## Stack\n- Rust\n## Conclusion\nDone";
        assert_eq!(
            canonicalize(raw).as_str(),
            "## STACK\n- Rust\n**Conclusion**\nDone"
        );
    }

    #[test]
    fn test_stray_headings_never_survive() {
        let raw = "## Stack\n## !!!\n##### Deep dive\n##### Strengths\n- Rust";
        let doc = canonicalize(raw);
        assert_eq!(doc.as_str(), "## STACK\n*Deep dive*\n*Strengths*\n- Rust");
        for line in doc.as_str().lines().filter(|l| l.starts_with("## ")) {
            assert!(line.strip_prefix("## ").unwrap().parse::<repolens_core::SectionKey>().is_ok());
        }
    }

    #[test]
    fn test_separators_dropped() {
        let raw = "## Weaknesses\n- slow\n---\n## Beginner Tasks\n- docs";
        assert_eq!(
            canonicalize(raw).as_str(),
            "## WEAKNESSES\n- slow\n## BEGINNER_TASKS\n- docs"
        );
    }

    #[test]
    fn test_no_headers_returns_input_verbatim() {
        let raw = "  Just a paragraph.\nAnother line.  ";
        let doc = canonicalize(raw);
        assert_eq!(doc.as_str(), raw);
        assert_eq!(score(doc.as_str()), 0);
    }

    #[test]
    fn test_unmarked_unclassified_lines_are_content() {
        let raw = "## Improvement Suggestions\nAdd tests\n1. Write docs\nRefactor";
        assert_eq!(
            canonicalize(raw).as_str(),
            "## IMPROVEMENT_SUGGESTIONS\nAdd tests\n1. Write docs\nRefactor"
        );
    }

    #[test]
    fn test_score_matches_distinct_headers() {
        let raw = "## Resumo\nx\n## Tecnologias\ny\n## Pontos Fracos\nz\n## Sugestões\nw";
        assert_eq!(score(canonicalize(raw).as_str()), 4);
    }

    #[test]
    fn test_all_six_portuguese_headers() {
        let raw = "## Resumo Arquitetural\na\n## Explicação da Stack\nb\n## Pontos Fortes\nc\n## Pontos Fracos\nd\n## Sugestões de Melhoria\ne\n## Tarefas para Iniciantes\nf";
        let doc = canonicalize(raw);
        assert_eq!(score(doc.as_str()), 6);
        assert!(doc.as_str().starts_with("## ARCHITECTURAL_SUMMARY\na"));
        assert!(doc.as_str().ends_with("## BEGINNER_TASKS\nf"));
    }

    #[test]
    fn test_legacy_canonical_keys() {
        let raw = "## RESUMO_ARQUITETURAL\na\n## PONTOS_FORTES\nb\n## SUGESTOES_MELHORIA\nc\n## TAREFAS_INICIANTES\nd";
        assert_eq!(
            canonicalize(raw).as_str(),
            "## ARCHITECTURAL_SUMMARY\na\n## STRENGTHS\nb\n## IMPROVEMENT_SUGGESTIONS\nc\n## BEGINNER_TASKS\nd"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(canonicalize("").as_str(), "");
    }
}
