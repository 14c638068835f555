//! Structural completeness scoring.
//!
//! A document's score is the number of distinct canonical section headers
//! (`## KEY` on a line of its own) it contains. Content is never judged.

use std::collections::BTreeSet;

use repolens_core::SectionKey;

/// Canonical keys present in a document, in key order.
pub fn present_keys(document: &str) -> BTreeSet<SectionKey> {
    document
        .lines()
        .filter_map(|line| line.trim().strip_prefix("## "))
        .filter_map(|rest| rest.parse::<SectionKey>().ok())
        .collect()
}

/// Canonical keys a document is missing, in rendering order.
pub fn missing_keys(document: &str) -> Vec<SectionKey> {
    let present = present_keys(document);
    SectionKey::ALL
        .into_iter()
        .filter(|key| !present.contains(key))
        .collect()
}

/// Count of distinct canonical headers, 0..=6.
pub fn score(document: &str) -> usize {
    present_keys(document).len()
}
