//! Report generation configuration.
//!
//! Configuration can be loaded from:
//! - A TOML file named by `REPOLENS_CONFIG` (a `[report]` table, with
//!   `${VAR}` placeholders substituted from the environment)
//! - Environment variables (`GEMINI_*`, `REPOLENS_*`)
//!
//! # Example
//!
//! ```rust,no_run
//! use repolens_inference::config::ReportConfig;
//!
//! // Load from REPOLENS_CONFIG or fall back to env vars
//! let config = ReportConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = ReportConfig::from_file(std::path::Path::new("repolens.toml")).expect("Failed to load");
//! ```

use std::env;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use repolens_core::defaults;
use repolens_core::GenerationParams;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for repolens_core::Error {
    fn from(e: ConfigError) -> Self {
        repolens_core::Error::Config(e.to_string())
    }
}

/// When a generated document is good enough to stop, or to return at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptancePolicy {
    /// Canonical sections needed to accept a document immediately.
    #[serde(default = "AcceptancePolicy::default_min_sections")]
    pub min_sections: usize,
    /// Canonical sections needed for the best partial result to be returned
    /// once every candidate is exhausted.
    #[serde(default = "AcceptancePolicy::default_partial_floor")]
    pub partial_floor: usize,
    /// Never accept a document the provider reported as truncated.
    #[serde(default = "AcceptancePolicy::default_reject_truncated")]
    pub reject_truncated: bool,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            min_sections: Self::default_min_sections(),
            partial_floor: Self::default_partial_floor(),
            reject_truncated: Self::default_reject_truncated(),
        }
    }
}

impl AcceptancePolicy {
    fn default_min_sections() -> usize {
        defaults::MIN_SECTIONS
    }

    fn default_partial_floor() -> usize {
        defaults::PARTIAL_FLOOR
    }

    fn default_reject_truncated() -> bool {
        true
    }

    /// Whether a scored document ends the candidate loop.
    pub fn accepts(&self, score: usize, truncated: bool) -> bool {
        score >= self.min_sections && !(truncated && self.reject_truncated)
    }

    /// Whether a best partial result may be returned after exhaustion.
    pub fn keeps_partial(&self, score: usize) -> bool {
        score >= self.partial_floor
    }

    /// Validate the policy.
    pub fn validate(&self) -> ConfigResult<()> {
        let max = repolens_core::SectionKey::ALL.len();
        if self.min_sections == 0 || self.min_sections > max {
            return Err(ConfigError::Validation(format!(
                "min_sections must be between 1 and {}, got: {}",
                max, self.min_sections
            )));
        }
        if self.partial_floor == 0 || self.partial_floor > self.min_sections {
            return Err(ConfigError::Validation(format!(
                "partial_floor must be between 1 and min_sections ({}), got: {}",
                self.min_sections, self.partial_floor
            )));
        }
        Ok(())
    }
}

/// Generation backend and acceptance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// API key for the generation provider.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the generation API.
    #[serde(default = "ReportConfig::default_base_url")]
    pub base_url: String,
    /// Model tried before any discovered or static candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_model: Option<String>,
    /// Protocol versions in preference order.
    #[serde(default = "ReportConfig::default_api_versions")]
    pub api_versions: Vec<String>,
    /// Static candidates tried after discovered ones.
    #[serde(default = "ReportConfig::default_fallback_models")]
    pub fallback_models: Vec<String>,
    /// Per-call timeout in seconds.
    #[serde(default = "ReportConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sampling parameters.
    #[serde(default)]
    pub generation: GenerationParams,
    /// Acceptance thresholds.
    #[serde(default)]
    pub acceptance: AcceptancePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            preferred_model: None,
            api_versions: Self::default_api_versions(),
            fallback_models: Self::default_fallback_models(),
            timeout_secs: Self::default_timeout_secs(),
            generation: GenerationParams::default(),
            acceptance: AcceptancePolicy::default(),
        }
    }
}

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

impl ReportConfig {
    fn default_base_url() -> String {
        defaults::GEMINI_BASE_URL.to_string()
    }

    fn default_api_versions() -> Vec<String> {
        defaults::API_VERSIONS.iter().map(|v| v.to_string()).collect()
    }

    fn default_fallback_models() -> Vec<String> {
        defaults::FALLBACK_MODELS
            .iter()
            .map(|m| m.to_string())
            .collect()
    }

    fn default_timeout_secs() -> u64 {
        defaults::CALL_TIMEOUT_SECS
    }

    /// Load configuration from `REPOLENS_CONFIG`, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        match env::var("REPOLENS_CONFIG") {
            Ok(path) if Path::new(&path).exists() => {
                info!("Loading report config from: {}", path);
                Self::from_file(Path::new(&path))
            }
            Ok(path) => {
                debug!("Config file not found at {}, using environment variables", path);
                Self::from_env()
            }
            Err(_) => Self::from_env(),
        }
    }

    /// Load configuration from a TOML file with a `[report]` table.
    ///
    /// The API key falls back to the environment when the file omits it.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            report: ReportConfig,
        }

        let mut config = toml::from_str::<TomlRoot>(&content)?.report;
        if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            config.api_key = Self::api_key_from_env();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self {
            api_key: Self::api_key_from_env(),
            preferred_model: non_empty_var("GEMINI_MODEL"),
            ..Default::default()
        };

        if let Some(url) = non_empty_var("GEMINI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(list) = non_empty_var("GEMINI_API_VERSIONS") {
            config.api_versions = split_list(&list);
        }
        if let Some(list) = non_empty_var("GEMINI_FALLBACK_MODELS") {
            config.fallback_models = split_list(&list);
        }
        if let Some(secs) = parse_var("GEMINI_TIMEOUT_SECS") {
            config.timeout_secs = secs;
        }
        if let Some(min) = parse_var("REPOLENS_MIN_SECTIONS") {
            config.acceptance.min_sections = min;
        }
        if let Some(floor) = parse_var("REPOLENS_PARTIAL_FLOOR") {
            config.acceptance.partial_floor = floor;
        }

        config.validate()?;
        Ok(config)
    }

    /// `GEMINI_API_KEY`, then `OPENAI_API_KEY`.
    fn api_key_from_env() -> Option<String> {
        non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("OPENAI_API_KEY"))
    }

    /// Whether a credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.api_versions.is_empty() {
            return Err(ConfigError::Validation(
                "api_versions cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.generation.max_output_tokens == 0 {
            return Err(ConfigError::Validation(
                "generation.max_output_tokens must be greater than zero".to_string(),
            ));
        }

        self.acceptance.validate()
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
