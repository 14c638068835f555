//! # repolens-inference
//!
//! Resilient report acquisition for repolens.
//!
//! This crate provides:
//! - Gemini generation backend (model listing and `generateContent`)
//! - Candidate resolution: configured, discovered, then static models
//! - The generation loop with quality gating, partial results and cancellation
//! - Header canonicalization and completeness scoring
//! - A deterministic metadata-only fallback report
//! - TOML/env configuration
//!
//! # Feature Flags
//!
//! - `mock`: expose the scripted [`mock::MockBackend`] to downstream tests
//!
//! # Example
//!
//! ```rust,no_run
//! use repolens_inference::{ReportConfig, ReportGenerator, ReportLanguage, RepositorySnapshot};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ReportConfig::from_env().unwrap();
//!     let generator = ReportGenerator::from_config(&config).unwrap();
//!     let snapshot = RepositorySnapshot::default();
//!     let report = generator
//!         .generate(&snapshot, ReportLanguage::English, &CancellationToken::new())
//!         .await;
//! }
//! ```

pub mod canonicalize;
pub mod completeness;
pub mod config;
pub mod fallback;
pub mod gemini;
pub mod generation;
pub mod prompt;
pub mod resolver;

// Scripted backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use repolens_core::*;

pub use canonicalize::{canonicalize, Canonicalizer};
pub use completeness::{missing_keys, present_keys, score};
pub use config::{AcceptancePolicy, ConfigError, ConfigResult, ReportConfig};
pub use fallback::synthesize;
pub use gemini::GeminiBackend;
pub use generation::{AttemptLedger, GeneratedReport, ReportGenerator};
pub use prompt::{build_prompt, build_request, build_system_instruction};
pub use resolver::CandidateResolver;
