//! # repolens-render
//!
//! Presentation-side section parser for repolens reports.
//!
//! Re-derives sections from the final report text independently of the
//! acquisition pipeline, so fallback reports and partially canonical
//! documents render the same way. Each section carries its raw content plus
//! a classified body (definition list, bullet list or paragraphs) with
//! inline `**strong**` and `` `code` `` spans.
//!
//! ```rust
//! use repolens_render::{parse, SectionBody};
//!
//! let sections = parse("## STRENGTHS\n- Fast\n- Small");
//! assert_eq!(sections[0].label.as_str(), "STRENGTHS");
//! assert!(matches!(sections[0].body, SectionBody::BulletList { .. }));
//! ```

pub mod body;
pub mod inline;
pub mod parser;

pub use body::{DefinitionItem, SectionBody};
pub use inline::{spans, RichText, Span};
pub use parser::{parse, RenderSection, SectionLabel};
