//! Specwright configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. They are read once per invocation and never cached
//! globally, so a changed environment takes effect on the next call.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `ANTHROPIC_API_KEY` | Credential for the hosted backend |
//! | `SPECWRIGHT_USE_LOCAL_LLM` | `true`/`1` selects the local backend |
//! | `SPECWRIGHT_LOCAL_LLM_URL` | Base URL of the local backend |
//! | `SPECWRIGHT_BASE_URL` | Default target URL for generated tests |
//! | `SPECWRIGHT_MODEL` | Hosted model identifier |
//! | `SPECWRIGHT_MAX_TOKENS` | Token budget for a completion |
//! | `SPECWRIGHT_ARTIFACTS_DIR` | Directory for generated test files |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Hosted messaging endpoint
pub const DEFAULT_HOSTED_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Hosted model identifier
pub const DEFAULT_HOSTED_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Model name sent to local servers, which generally ignore it
pub const DEFAULT_LOCAL_MODEL: &str = "local-model";

pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Where generated tests are written, relative to the working directory
pub const DEFAULT_ARTIFACTS_DIR: &str = "tests/generated";

/// Where Playwright Test leaves traces and screenshots
pub const DEFAULT_RESULTS_DIR: &str = "test-results";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "specwright.toml";

pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_USE_LOCAL: &str = "SPECWRIGHT_USE_LOCAL_LLM";
pub const ENV_LOCAL_URL: &str = "SPECWRIGHT_LOCAL_LLM_URL";
pub const ENV_BASE_URL: &str = "SPECWRIGHT_BASE_URL";
pub const ENV_MODEL: &str = "SPECWRIGHT_MODEL";
pub const ENV_MAX_TOKENS: &str = "SPECWRIGHT_MAX_TOKENS";
pub const ENV_ARTIFACTS_DIR: &str = "SPECWRIGHT_ARTIFACTS_DIR";

/// Which generation backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Hosted,
    Local,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Hosted => write!(f, "hosted"),
            ProviderKind::Local => write!(f, "local"),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Generation backend configuration
    pub provider: ProviderSettings,

    /// Application under test
    pub target: TargetSettings,

    /// Artifact storage
    pub artifacts: ArtifactSettings,

    /// Execution engine
    pub runner: RunnerSettings,
}

/// Generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub kind: ProviderKind,

    /// Hosted credential; usually supplied through the environment
    pub api_key: Option<String>,

    pub hosted_endpoint: String,

    pub model: String,

    /// Base URL of the local server, e.g. `http://localhost:1234`
    pub local_url: Option<String>,

    pub local_model: String,

    pub max_tokens: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Hosted,
            api_key: None,
            hosted_endpoint: DEFAULT_HOSTED_ENDPOINT.to_string(),
            model: DEFAULT_HOSTED_MODEL.to_string(),
            local_url: None,
            local_model: DEFAULT_LOCAL_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Used in prompts when a scenario carries no URL of its own
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    pub dir: PathBuf,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }
}

/// Execution engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    /// Program and leading arguments, before the test file path
    pub command: Vec<String>,

    /// Output directory searched for screenshots after a run
    pub results_dir: PathBuf,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            command: vec!["npx".to_string(), "playwright".to_string(), "test".to_string()],
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let settings: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded settings from {}", path.display());
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.provider.api_key = Some(key);
        }
        if let Some(flag) = get(ENV_USE_LOCAL) {
            self.provider.kind = if parse_flag(&flag) {
                ProviderKind::Local
            } else {
                ProviderKind::Hosted
            };
        }
        if let Some(url) = get(ENV_LOCAL_URL) {
            self.provider.local_url = Some(url);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(max_tokens) = get(ENV_MAX_TOKENS) {
            match max_tokens.trim().parse() {
                Ok(n) => self.provider.max_tokens = n,
                Err(_) => tracing::warn!(
                    "Ignoring {}={}: not a number",
                    ENV_MAX_TOKENS,
                    max_tokens
                ),
            }
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.target.base_url = Some(base_url);
        }
        if let Some(dir) = get(ENV_ARTIFACTS_DIR) {
            self.artifacts.dir = PathBuf::from(dir);
        }
    }

    /// Copy safe to print: the credential is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.provider.api_key.is_some() {
            copy.provider.api_key = Some("********".to_string());
        }
        copy
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
