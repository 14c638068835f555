//! Centralized default constants for repolens.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic numbers.

// =============================================================================
// GENERATION BACKEND
// =============================================================================

/// Base URL of the Generative Language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Protocol versions in preference order.
pub const API_VERSIONS: &[&str] = &["v1beta", "v1"];

/// Static fallback models, tried after configured and discovered ones.
pub const FALLBACK_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
];

/// Capability a listed model must advertise to be a candidate.
pub const GENERATION_METHOD: &str = "generateContent";

/// Per-call timeout for listing and generation requests (seconds).
pub const CALL_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// GENERATION PARAMETERS
// =============================================================================

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

// =============================================================================
// ACCEPTANCE POLICY
// =============================================================================

/// Minimum canonical sections for a document to be accepted immediately.
pub const MIN_SECTIONS: usize = 3;

/// Minimum canonical sections for a best partial result to be returned.
pub const PARTIAL_FLOOR: usize = 1;

// =============================================================================
// SNAPSHOT BOUNDS
// =============================================================================

/// Maximum README characters kept in a snapshot.
pub const README_MAX_CHARS: usize = 12_000;

/// Maximum file-tree entries kept in a snapshot.
pub const TREE_MAX_ENTRIES: usize = 120;

// =============================================================================
// PROMPT
// =============================================================================

/// Languages listed in the prompt.
pub const PROMPT_TOP_LANGUAGES: usize = 8;

/// Tree lines included in the prompt.
pub const PROMPT_TREE_LINES: usize = 60;

/// README characters included in the prompt.
pub const PROMPT_README_CHARS: usize = 4_000;

/// Languages listed in a fallback report.
pub const FALLBACK_TOP_LANGUAGES: usize = 5;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// User agent sent to GitHub.
pub const USER_AGENT: &str = "repolens-ai";
