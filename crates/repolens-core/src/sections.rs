//! Section keys and the header primitives shared by the canonicalizer and the
//! presentation parser.
//!
//! Header handling is split in two stages:
//!
//! 1. **Shape detection** ([`HeaderLine::parse`]): does the line look like a
//!    header at all (markdown heading of depth 2–4, whole-line bold, numbered
//!    prefix, or a short bare label)? The decorations are stripped and the
//!    remaining title is normalized with [`normalize_label`].
//! 2. **Classification** ([`SectionClassifier`]): an ordered chain of
//!    [`HeaderMatcher`]s maps the normalized title to a [`SectionKey`]. The
//!    first matcher that recognizes any key wins; inside a matcher, ties are
//!    broken by alias order.
//!
//! Generated reports arrive in English or Portuguese, so every key carries
//! aliases in both languages.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::ReportLanguage;

// =============================================================================
// SECTION KEY
// =============================================================================

/// The six canonical report sections, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKey {
    ArchitecturalSummary,
    Stack,
    Strengths,
    Weaknesses,
    ImprovementSuggestions,
    BeginnerTasks,
}

impl SectionKey {
    /// All keys in rendering order.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::ArchitecturalSummary,
        SectionKey::Stack,
        SectionKey::Strengths,
        SectionKey::Weaknesses,
        SectionKey::ImprovementSuggestions,
        SectionKey::BeginnerTasks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArchitecturalSummary => "ARCHITECTURAL_SUMMARY",
            Self::Stack => "STACK",
            Self::Strengths => "STRENGTHS",
            Self::Weaknesses => "WEAKNESSES",
            Self::ImprovementSuggestions => "IMPROVEMENT_SUGGESTIONS",
            Self::BeginnerTasks => "BEGINNER_TASKS",
        }
    }

    /// The exact header line a canonical document uses for this key.
    pub fn canonical_header(&self) -> String {
        format!("## {}", self.as_str())
    }

    /// Display title in the given language.
    pub fn title(&self, language: ReportLanguage) -> &'static str {
        match (self, language) {
            (Self::ArchitecturalSummary, ReportLanguage::English) => "Architectural Summary",
            (Self::Stack, ReportLanguage::English) => "Stack Explanation",
            (Self::Strengths, ReportLanguage::English) => "Strengths",
            (Self::Weaknesses, ReportLanguage::English) => "Weaknesses",
            (Self::ImprovementSuggestions, ReportLanguage::English) => "Improvement Suggestions",
            (Self::BeginnerTasks, ReportLanguage::English) => "Beginner Tasks",
            (Self::ArchitecturalSummary, ReportLanguage::Portuguese) => "Resumo Arquitetural",
            (Self::Stack, ReportLanguage::Portuguese) => "Explicação da Stack",
            (Self::Strengths, ReportLanguage::Portuguese) => "Pontos Fortes",
            (Self::Weaknesses, ReportLanguage::Portuguese) => "Pontos Fracos",
            (Self::ImprovementSuggestions, ReportLanguage::Portuguese) => "Sugestões de Melhoria",
            (Self::BeginnerTasks, ReportLanguage::Portuguese) => "Tarefas para Iniciantes",
        }
    }

    /// Normalized aliases for this key, in match-priority order.
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        ALIASES
            .iter()
            .filter(move |(key, _)| key == self)
            .map(|(_, alias)| *alias)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown section key: {}", s))
    }
}

/// Flat alias table. Order is the tie-breaker for every matcher.
///
/// Each key lists its own canonical name first so canonical documents always
/// classify by exact match.
static ALIASES: &[(SectionKey, &str)] = &[
    (SectionKey::ArchitecturalSummary, "architectural_summary"),
    (SectionKey::ArchitecturalSummary, "resumo_arquitetural"),
    (SectionKey::ArchitecturalSummary, "resumo"),
    (SectionKey::ArchitecturalSummary, "arquitetural"),
    (SectionKey::ArchitecturalSummary, "arquitetura"),
    (SectionKey::ArchitecturalSummary, "architecture"),
    (SectionKey::ArchitecturalSummary, "visao_geral"),
    (SectionKey::ArchitecturalSummary, "overview"),
    (SectionKey::ArchitecturalSummary, "summary"),
    (SectionKey::Stack, "stack"),
    (SectionKey::Stack, "tech_stack"),
    (SectionKey::Stack, "technology_stack"),
    (SectionKey::Stack, "stack_explanation"),
    (SectionKey::Stack, "stack_tecnologica"),
    (SectionKey::Stack, "pilha_tecnologica"),
    (SectionKey::Stack, "tecnologias"),
    (SectionKey::Stack, "technologies"),
    (SectionKey::Strengths, "strengths"),
    (SectionKey::Strengths, "pontos_fortes"),
    (SectionKey::Strengths, "fortes"),
    (SectionKey::Strengths, "forcas"),
    (SectionKey::Weaknesses, "weaknesses"),
    (SectionKey::Weaknesses, "pontos_fracos"),
    (SectionKey::Weaknesses, "fracos"),
    (SectionKey::Weaknesses, "fraquezas"),
    (SectionKey::ImprovementSuggestions, "improvement_suggestions"),
    (SectionKey::ImprovementSuggestions, "sugestoes_melhoria"),
    (SectionKey::ImprovementSuggestions, "sugestoes"),
    (SectionKey::ImprovementSuggestions, "melhorias"),
    (SectionKey::ImprovementSuggestions, "suggestions"),
    (SectionKey::ImprovementSuggestions, "improvements"),
    (SectionKey::ImprovementSuggestions, "recomendacoes"),
    (SectionKey::ImprovementSuggestions, "recommendations"),
    (SectionKey::BeginnerTasks, "beginner_tasks"),
    (SectionKey::BeginnerTasks, "tarefas_iniciantes"),
    (SectionKey::BeginnerTasks, "tarefas"),
    (SectionKey::BeginnerTasks, "iniciantes"),
    (SectionKey::BeginnerTasks, "good_first_issues"),
];

/// Alias tokens too generic to drive token-overlap matching on their own.
const GENERIC_TOKENS: &[&str] = &[
    "good", "first", "issues", "pontos", "geral", "visao", "tech", "pilha",
];

/// Shortest token considered by the token-overlap matcher.
const MIN_TOKEN_LEN: usize = 4;

/// Shortest candidate allowed to match by being contained in an alias.
const MIN_CONTAINED_LEN: usize = 4;

/// Longest bare or numbered label (in words) treated as a header candidate.
const MAX_LABEL_WORDS: usize = 5;

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Case-fold, strip diacritics, and collapse every non-alphanumeric run to `_`.
///
/// `"### Sugestões de Melhoria!"` → `"sugestoes_de_melhoria"`.
pub fn normalize_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.nfd().filter(|c| !is_combining_mark(*c)) {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Whether a line is a horizontal rule made of three or more dashes.
pub fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

// =============================================================================
// SHAPE DETECTION
// =============================================================================

static NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\s*[.)\-–—]\s*").unwrap());
static BOLD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*\s*[:：]?\s*$").unwrap());
static BARE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}[\p{L}\s_/\-]*$").unwrap());
static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s:：\-–—#]+$").unwrap());

/// How a header line was marked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderShape {
    /// `##`, `###` or `####` heading (depth stored).
    Heading(u8),
    /// Whole line wrapped in `**`, optionally numbered.
    Bold,
    /// Numbered prefix followed by a short plain label.
    Numbered,
    /// Short plain label with no markup at all.
    Bare,
}

impl HeaderShape {
    /// Marked headers are section boundaries even when they do not classify;
    /// numbered and bare labels only count when they name a known section.
    pub fn is_marked(&self) -> bool {
        matches!(self, Self::Heading(_) | Self::Bold)
    }
}

/// A line that has the shape of a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub shape: HeaderShape,
    /// Title with markup, numbering and trailing punctuation stripped.
    pub title: String,
    /// [`normalize_label`] of the title; never empty.
    pub normalized: String,
}

impl HeaderLine {
    /// Detect a header-shaped line. Returns `None` for ordinary content.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_separator(trimmed) {
            return None;
        }

        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if hashes > 0 {
            if !(2..=4).contains(&hashes) {
                return None;
            }
            let rest = strip_numbering(trimmed[hashes..].trim());
            let rest = match BOLD_LINE.captures(rest) {
                Some(caps) => caps.get(1).map_or(rest, |m| m.as_str()),
                None => rest,
            };
            return Self::build(HeaderShape::Heading(hashes as u8), rest);
        }

        let numbered = NUMBERING.is_match(trimmed);
        let rest = strip_numbering(trimmed);

        if let Some(caps) = BOLD_LINE.captures(rest) {
            let inner = caps.get(1).map_or("", |m| m.as_str());
            return Self::build(HeaderShape::Bold, inner);
        }

        if BARE_LABEL.is_match(rest) && rest.split_whitespace().count() <= MAX_LABEL_WORDS {
            let shape = if numbered {
                HeaderShape::Numbered
            } else {
                HeaderShape::Bare
            };
            return Self::build(shape, rest);
        }

        None
    }

    fn build(shape: HeaderShape, raw_title: &str) -> Option<Self> {
        let title = TRAILING_PUNCT.replace(raw_title.trim(), "").trim().to_string();
        let normalized = normalize_label(&title);
        if normalized.is_empty() {
            return None;
        }
        Some(Self {
            shape,
            title,
            normalized,
        })
    }

    /// Label used when the header does not classify, e.g. `"CONCLUSION"`.
    pub fn derived_label(&self) -> String {
        self.normalized.to_uppercase()
    }
}

fn strip_numbering(text: &str) -> &str {
    match NUMBERING.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// One heuristic in the classification chain.
pub trait HeaderMatcher: Send + Sync {
    /// Short name used in trace logs.
    fn name(&self) -> &'static str;

    /// Classify a detected header, or `None` if this heuristic does not apply.
    fn try_match(&self, header: &HeaderLine) -> Option<SectionKey>;
}

/// Normalized title equals an alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactAliasMatcher;

impl HeaderMatcher for ExactAliasMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn try_match(&self, header: &HeaderLine) -> Option<SectionKey> {
        ALIASES
            .iter()
            .find(|(_, alias)| *alias == header.normalized)
            .map(|(key, _)| *key)
    }
}

/// Normalized title contains an alias, or is contained in one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentMatcher;

impl HeaderMatcher for ContainmentMatcher {
    fn name(&self) -> &'static str {
        "containment"
    }

    fn try_match(&self, header: &HeaderLine) -> Option<SectionKey> {
        let candidate = header.normalized.as_str();
        ALIASES
            .iter()
            .find(|(_, alias)| {
                candidate.contains(alias)
                    || (candidate.len() >= MIN_CONTAINED_LEN && alias.contains(candidate))
            })
            .map(|(key, _)| *key)
    }
}

/// Some word of the title is a prefix or suffix of some alias word (or vice
/// versa). Applies to marked headers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenOverlapMatcher;

impl TokenOverlapMatcher {
    fn tokens_overlap(a: &str, b: &str) -> bool {
        a.starts_with(b) || b.starts_with(a) || a.ends_with(b) || b.ends_with(a)
    }
}

impl HeaderMatcher for TokenOverlapMatcher {
    fn name(&self) -> &'static str {
        "token_overlap"
    }

    fn try_match(&self, header: &HeaderLine) -> Option<SectionKey> {
        // Unmarked lines are too often ordinary prose for word-level matching.
        if !header.shape.is_marked() {
            return None;
        }

        let words: Vec<&str> = header
            .normalized
            .split('_')
            .filter(|w| w.len() >= MIN_TOKEN_LEN)
            .collect();
        if words.is_empty() {
            return None;
        }

        ALIASES
            .iter()
            .find(|(_, alias)| {
                alias
                    .split('_')
                    .filter(|t| t.len() >= MIN_TOKEN_LEN && !GENERIC_TOKENS.contains(t))
                    .any(|token| words.iter().any(|w| Self::tokens_overlap(w, token)))
            })
            .map(|(key, _)| *key)
    }
}

/// A header line together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedHeader {
    pub header: HeaderLine,
    /// `None` for marked headers that name no known section.
    pub key: Option<SectionKey>,
}

/// Ordered chain of matchers.
pub struct SectionClassifier {
    matchers: Vec<Box<dyn HeaderMatcher>>,
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for SectionClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.matchers.iter().map(|m| m.name()).collect();
        f.debug_struct("SectionClassifier")
            .field("matchers", &names)
            .finish()
    }
}

impl SectionClassifier {
    /// Exact alias → containment → token overlap.
    pub fn standard() -> Self {
        Self::with_matchers(vec![
            Box::new(ExactAliasMatcher),
            Box::new(ContainmentMatcher),
            Box::new(TokenOverlapMatcher),
        ])
    }

    /// Build a classifier from an explicit chain.
    pub fn with_matchers(matchers: Vec<Box<dyn HeaderMatcher>>) -> Self {
        Self { matchers }
    }

    /// Run the chain; the first matcher that recognizes a key wins.
    pub fn classify(&self, header: &HeaderLine) -> Option<SectionKey> {
        self.matchers.iter().find_map(|matcher| {
            let key = matcher.try_match(header)?;
            tracing::trace!(
                matcher = matcher.name(),
                title = %header.title,
                key = %key,
                "Header classified"
            );
            Some(key)
        })
    }

    /// Detect and classify a line.
    ///
    /// Returns `None` for content lines, including numbered or bare labels
    /// that do not name a known section.
    pub fn detect(&self, line: &str) -> Option<DetectedHeader> {
        let header = HeaderLine::parse(line)?;
        let key = self.classify(&header);
        if key.is_none() && !header.shape.is_marked() {
            return None;
        }
        Some(DetectedHeader { header, key })
    }

    /// Like [`detect`](Self::detect), but only headings and whole-line bold
    /// labels count. Bare and numbered labels stay content.
    pub fn detect_marked(&self, line: &str) -> Option<DetectedHeader> {
        let header = HeaderLine::parse(line)?;
        if !header.shape.is_marked() {
            return None;
        }
        let key = self.classify(&header);
        Some(DetectedHeader { header, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Option<SectionKey> {
        SectionClassifier::standard()
            .detect(line)
            .and_then(|d| d.key)
    }

    #[test]
    fn test_normalize_label_strips_diacritics_and_punctuation() {
        assert_eq!(normalize_label("Sugestões de Melhoria!"), "sugestoes_de_melhoria");
        assert_eq!(normalize_label("  Visão   Geral "), "visao_geral");
        assert_eq!(normalize_label("Stack Tecnológica"), "stack_tecnologica");
        assert_eq!(normalize_label("RESUMO_ARQUITETURAL"), "resumo_arquitetural");
        assert_eq!(normalize_label("Forças"), "forcas");
        assert_eq!(normalize_label("--"), "");
    }

    #[test]
    fn test_is_separator() {
        assert!(is_separator("---"));
        assert!(is_separator("  ------  "));
        assert!(!is_separator("--"));
        assert!(!is_separator("- item"));
    }

    #[test]
    fn test_parse_heading_depths() {
        assert_eq!(
            HeaderLine::parse("## Stack").map(|h| h.shape),
            Some(HeaderShape::Heading(2))
        );
        assert_eq!(
            HeaderLine::parse("#### Stack").map(|h| h.shape),
            Some(HeaderShape::Heading(4))
        );
        assert!(HeaderLine::parse("# Stack").is_none());
        assert!(HeaderLine::parse("##### Stack").is_none());
        assert!(HeaderLine::parse("##").is_none());
    }

    #[test]
    fn test_parse_strips_numbering_bold_and_trailing_colon() {
        let header = HeaderLine::parse("### 1. Resumo Arquitetural").unwrap();
        assert_eq!(header.title, "Resumo Arquitetural");
        assert_eq!(header.normalized, "resumo_arquitetural");

        let header = HeaderLine::parse("## **Pontos Fortes:**").unwrap();
        assert_eq!(header.title, "Pontos Fortes");

        let header = HeaderLine::parse("2) **Stack**:").unwrap();
        assert_eq!(header.shape, HeaderShape::Bold);
        assert_eq!(header.title, "Stack");

        let header = HeaderLine::parse("## 2 - Pontos Fortes -").unwrap();
        assert_eq!(header.title, "Pontos Fortes");
    }

    #[test]
    fn test_parse_rejects_content_lines() {
        assert!(HeaderLine::parse("- Specific strength with justification").is_none());
        assert!(HeaderLine::parse("**Frontend**: React, TypeScript").is_none());
        assert!(HeaderLine::parse("Project X is a Y application.").is_none());
        assert!(HeaderLine::parse("This label has far too many words to be a header").is_none());
        assert!(HeaderLine::parse("").is_none());
        assert!(HeaderLine::parse("---").is_none());
    }

    #[test]
    fn test_parse_bare_and_numbered_labels() {
        assert_eq!(
            HeaderLine::parse("Pontos Fracos").map(|h| h.shape),
            Some(HeaderShape::Bare)
        );
        assert_eq!(
            HeaderLine::parse("3. Pontos Fracos").map(|h| h.shape),
            Some(HeaderShape::Numbered)
        );
    }

    #[test]
    fn test_exact_aliases_in_both_languages() {
        assert_eq!(classify("## RESUMO_ARQUITETURAL"), Some(SectionKey::ArchitecturalSummary));
        assert_eq!(classify("## ARCHITECTURAL_SUMMARY"), Some(SectionKey::ArchitecturalSummary));
        assert_eq!(classify("## STACK"), Some(SectionKey::Stack));
        assert_eq!(classify("**Pontos Fortes**"), Some(SectionKey::Strengths));
        assert_eq!(classify("### Weaknesses"), Some(SectionKey::Weaknesses));
        assert_eq!(classify("## Sugestões Melhoria"), Some(SectionKey::ImprovementSuggestions));
        assert_eq!(classify("## Good First Issues"), Some(SectionKey::BeginnerTasks));
    }

    #[test]
    fn test_containment_match() {
        assert_eq!(classify("## Sugestões de Melhoria"), Some(SectionKey::ImprovementSuggestions));
        assert_eq!(classify("## Tarefas para Iniciantes"), Some(SectionKey::BeginnerTasks));
        assert_eq!(classify("## Principais Pontos Fracos"), Some(SectionKey::Weaknesses));
        assert_eq!(classify("## Explicação da Stack"), Some(SectionKey::Stack));
    }

    #[test]
    fn test_token_overlap_match() {
        assert_eq!(classify("## Suggested Improvement Ideas"), Some(SectionKey::ImprovementSuggestions));
        assert_eq!(classify("### Key Strength Areas"), Some(SectionKey::Strengths));
        assert_eq!(classify("## Tasks for Beginners"), Some(SectionKey::BeginnerTasks));
    }

    #[test]
    fn test_token_overlap_ignores_bare_lines() {
        assert_eq!(classify("Performance improvement ideas"), None);
        assert_eq!(classify("## Performance improvement ideas"), Some(SectionKey::ImprovementSuggestions));
    }

    #[test]
    fn test_generic_tokens_do_not_classify() {
        assert_eq!(classify("## Good Practices"), None);
        assert!(SectionClassifier::standard().detect("## Good Practices").is_some());
    }

    #[test]
    fn test_unmarked_unclassified_lines_are_not_headers() {
        let classifier = SectionClassifier::standard();
        assert!(classifier.detect("Add unit tests").is_none());
        assert!(classifier.detect("1. Write the docs").is_none());
        assert!(classifier.detect("Pontos Fracos").is_some());
    }

    #[test]
    fn test_detect_marked_ignores_bare_and_numbered_labels() {
        let classifier = SectionClassifier::standard();
        assert!(classifier.detect("Clean architecture").is_some());
        assert!(classifier.detect_marked("Clean architecture").is_none());
        assert!(classifier.detect_marked("1. Write an architecture overview").is_none());

        let detected = classifier.detect_marked("### 1. Resumo Arquitetural").unwrap();
        assert_eq!(detected.key, Some(SectionKey::ArchitecturalSummary));
        let detected = classifier.detect_marked("**Pontos Fortes**").unwrap();
        assert_eq!(detected.key, Some(SectionKey::Strengths));
        assert_eq!(classifier.detect_marked("## Conclusion").unwrap().key, None);
    }

    #[test]
    fn test_marked_unclassified_headers_are_kept() {
        let detected = SectionClassifier::standard().detect("## Conclusion").unwrap();
        assert_eq!(detected.key, None);
        assert_eq!(detected.header.derived_label(), "CONCLUSION");
    }

    #[test]
    fn test_every_canonical_header_classifies_to_itself() {
        for key in SectionKey::ALL {
            assert_eq!(classify(&key.canonical_header()), Some(key));
            assert_eq!(key.aliases().next(), Some(normalize_label(key.as_str()).as_str()));
        }
    }

    #[test]
    fn test_section_key_from_str_and_serde() {
        assert_eq!("STACK".parse::<SectionKey>(), Ok(SectionKey::Stack));
        assert!("stack".parse::<SectionKey>().is_err());
        assert_eq!(
            serde_json::to_string(&SectionKey::BeginnerTasks).unwrap(),
            "\"BEGINNER_TASKS\""
        );
    }

    #[test]
    fn test_titles_are_localized() {
        assert_eq!(SectionKey::Strengths.title(ReportLanguage::English), "Strengths");
        assert_eq!(SectionKey::Strengths.title(ReportLanguage::Portuguese), "Pontos Fortes");
    }

    struct AlwaysStack;

    impl HeaderMatcher for AlwaysStack {
        fn name(&self) -> &'static str {
            "always_stack"
        }

        fn try_match(&self, _header: &HeaderLine) -> Option<SectionKey> {
            Some(SectionKey::Stack)
        }
    }

    #[test]
    fn test_custom_matcher_chain_order() {
        let classifier =
            SectionClassifier::with_matchers(vec![Box::new(AlwaysStack), Box::new(ExactAliasMatcher)]);
        let header = HeaderLine::parse("## Strengths").unwrap();
        assert_eq!(classifier.classify(&header), Some(SectionKey::Stack));
    }
}
