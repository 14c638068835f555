//! # repolens-core
//!
//! Core types, traits, and section primitives for repolens.
//!
//! This crate provides the data structures shared by the acquisition
//! pipeline, the HTTP service and the presentation parser, plus the header
//! normalization and classification rules both sides agree on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod sections;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result, UpstreamKind};
pub use models::*;
pub use sections::{
    is_separator, normalize_label, ContainmentMatcher, DetectedHeader, ExactAliasMatcher,
    HeaderLine, HeaderMatcher, HeaderShape, SectionClassifier, SectionKey, TokenOverlapMatcher,
};
pub use traits::*;
