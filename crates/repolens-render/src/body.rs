//! Section body shapes.
//!
//! A section body renders as one of:
//! - a definition list, when at least two lines read `**Label**: value`
//! - a bullet list, when at least 40% of the lines start with `-`, `*` or `•`
//! - plain paragraphs otherwise
//!
//! Blank and separator lines are ignored for shape detection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use repolens_core::is_separator;

use crate::inline::RichText;

static DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*\s*[:：]\s*(.*)$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*•]\s").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*•]\s*").unwrap());

/// Minimum `**Label**: value` lines for a definition list.
const MIN_DEFINITIONS: usize = 2;

/// Minimum share of bullet lines (in percent) for a bullet list.
const MIN_BULLET_PERCENT: usize = 40;

/// One `label: value` entry. Lines before the first label have no label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionItem {
    pub label: Option<String>,
    pub value: RichText,
}

/// Classified section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    DefinitionList {
        items: Vec<DefinitionItem>,
    },
    BulletList {
        /// Paragraphs before the first bullet.
        lead: Vec<RichText>,
        items: Vec<RichText>,
    },
    Paragraphs {
        paragraphs: Vec<RichText>,
    },
}

fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line)
}

fn is_definition(line: &str) -> bool {
    DEFINITION.is_match(line.trim())
}

impl SectionBody {
    /// Classify and split a section's content.
    pub fn from_content(content: &str) -> Self {
        let lines: Vec<&str> = content
            .lines()
            .filter(|l| !l.trim().is_empty() && !is_separator(l))
            .collect();

        let definitions = lines.iter().filter(|l| is_definition(l)).count();
        if definitions >= MIN_DEFINITIONS {
            return Self::definition_list(&lines);
        }

        let bullets = lines.iter().filter(|l| is_bullet(l)).count();
        if bullets > 0 && bullets * 100 >= lines.len() * MIN_BULLET_PERCENT {
            return Self::bullet_list(&lines);
        }

        Self::Paragraphs {
            paragraphs: lines.iter().map(|l| RichText::new(l.trim())).collect(),
        }
    }

    fn definition_list(lines: &[&str]) -> Self {
        let mut items = Vec::new();
        let mut current: Option<(String, String)> = None;

        for line in lines {
            let line = line.trim();
            if let Some(caps) = DEFINITION.captures(line) {
                if let Some((label, value)) = current.take() {
                    items.push(DefinitionItem {
                        label: Some(label),
                        value: RichText::new(value),
                    });
                }
                current = Some((caps[1].trim().to_string(), caps[2].trim().to_string()));
            } else if let Some((_, value)) = current.as_mut() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line);
            } else {
                items.push(DefinitionItem {
                    label: None,
                    value: RichText::new(line),
                });
            }
        }

        if let Some((label, value)) = current {
            items.push(DefinitionItem {
                label: Some(label),
                value: RichText::new(value),
            });
        }
        Self::DefinitionList { items }
    }

    fn bullet_list(lines: &[&str]) -> Self {
        let mut lead = Vec::new();
        let mut items: Vec<String> = Vec::new();

        for line in lines {
            if is_bullet(line) {
                items.push(BULLET_PREFIX.replace(line, "").trim().to_string());
            } else if let Some(last) = items.last_mut() {
                last.push(' ');
                last.push_str(line.trim());
            } else {
                lead.push(RichText::new(line.trim()));
            }
        }

        Self::BulletList {
            lead,
            items: items.into_iter().map(RichText::new).collect(),
        }
    }
}
