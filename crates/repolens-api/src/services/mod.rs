//! Service layer for business logic.

pub mod analysis;

pub use analysis::{Analysis, AnalysisService, ReportSource};
