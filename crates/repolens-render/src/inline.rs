//! Inline emphasis spans.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*|`[^`]+`").unwrap());

/// One inline run of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Strong(String),
    Code(String),
}

/// A line of text together with its inline spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub text: String,
    pub spans: Vec<Span>,
}

impl RichText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let spans = spans(&text);
        Self { text, spans }
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Split text into plain, `**strong**` and `` `code` `` runs.
///
/// Unbalanced markers stay literal text.
pub fn spans(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut last = 0;

    for m in INLINE.find_iter(text) {
        if m.start() > last {
            out.push(Span::Text(text[last..m.start()].to_string()));
        }
        let token = m.as_str();
        if let Some(inner) = token.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
            out.push(Span::Strong(inner.to_string()));
        } else {
            out.push(Span::Code(token[1..token.len() - 1].to_string()));
        }
        last = m.end();
    }

    if last < text.len() {
        out.push(Span::Text(text[last..].to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_spans() {
        assert_eq!(
            spans("Uses **axum** with `tokio` runtime"),
            vec![
                Span::Text("Uses ".to_string()),
                Span::Strong("axum".to_string()),
                Span::Text(" with ".to_string()),
                Span::Code("tokio".to_string()),
                Span::Text(" runtime".to_string()),
            ]
        );
    }

    #[test]
    fn test_plain_and_empty() {
        assert_eq!(spans("plain"), vec![Span::Text("plain".to_string())]);
        assert!(spans("").is_empty());
    }

    #[test]
    fn test_unbalanced_markers_are_text() {
        assert_eq!(
            spans("a **b and `c"),
            vec![Span::Text("a **b and `c".to_string())]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Span::Code("x".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "code", "text": "x" }));
    }
}
