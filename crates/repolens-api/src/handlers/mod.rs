//! HTTP handlers for repolens-api.

pub mod analyze;
pub mod health;

pub use analyze::{analyze, AnalyzeRequest};
pub use health::health;
