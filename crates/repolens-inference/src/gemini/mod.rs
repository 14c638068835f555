//! Generative Language API backend.
//!
//! Implements [`repolens_core::ModelLister`] and [`repolens_core::ReportBackend`]
//! against the `v1beta` / `v1` REST endpoints:
//!
//! - `GET {base}/{version}/models?key=...`
//! - `POST {base}/{version}/models/{model}:generateContent?key=...`
//!
//! # Example
//!
//! ```rust,no_run
//! use repolens_inference::config::ReportConfig;
//! use repolens_inference::gemini::GeminiBackend;
//! use repolens_core::ModelLister;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::new(&ReportConfig::from_env().unwrap()).unwrap();
//!     let models = backend.list_models("v1beta").await.unwrap();
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{GeminiBackend, SYSTEM_INSTRUCTION_VERSION};
pub use error::{from_response, from_transport, is_model_not_found, upstream_kind};
pub use types::*;
