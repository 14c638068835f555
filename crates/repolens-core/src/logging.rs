//! Structured logging schema and field name constants for repolens.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed with no fallback available |
//! | WARN  | Recoverable issue, automatic fallback applied (partial report, fallback report) |
//! | INFO  | Lifecycle events (startup, shutdown), request completions |
//! | DEBUG | Decision points: candidate order, per-attempt scores, skipped versions |
//! | TRACE | Per-line canonicalization decisions |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "inference", "github", "render"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "resolver", "gemini", "generation", "canonicalize"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve", "generate", "list_models", "fetch"
pub const OPERATION: &str = "op";

/// Repository reference being analyzed.
pub const REPOSITORY: &str = "repository";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model identifier used for a generation attempt.
pub const MODEL: &str = "model";

/// Protocol version used for a generation attempt ("v1beta", "v1").
pub const API_VERSION: &str = "api_version";

/// Number of canonical sections found in a document.
pub const SECTIONS: &str = "sections";

/// Completion status reported by the provider.
pub const FINISH_REASON: &str = "finish_reason";

/// Number of resolved candidates.
pub const CANDIDATE_COUNT: &str = "candidate_count";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Reason code attached to a fallback report.
pub const FALLBACK_REASON: &str = "fallback_reason";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: &[&str] = &[
        SUBSYSTEM,
        COMPONENT,
        OPERATION,
        REPOSITORY,
        MODEL,
        API_VERSION,
        SECTIONS,
        FINISH_REASON,
        CANDIDATE_COUNT,
        DURATION_MS,
        PROMPT_LEN,
        RESPONSE_LEN,
        SUCCESS,
        ERROR_MSG,
        FALLBACK_REASON,
    ];

    #[test]
    fn test_field_names_unique_snake_case() {
        let unique: HashSet<&str> = ALL.iter().copied().collect();
        assert_eq!(unique.len(), ALL.len());
        for name in ALL {
            assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
