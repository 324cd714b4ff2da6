//! Core types for Specwright

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Timeout applied by the execution engine when none is requested
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Extension of generated Playwright Test files
pub const SPEC_EXTENSION: &str = ".spec.ts";

/// Browser engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(format!(
                "unknown browser '{}' (expected chromium, firefox or webkit)",
                other
            )),
        }
    }
}

/// Execution options attached to a scenario.
///
/// `None` means "let the generator or the engine pick", never an explicit
/// false or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<Browser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<bool>,

    /// Timeout in milliseconds, positive when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_browser(mut self, browser: Browser) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    pub fn with_screenshot(mut self, screenshot: bool) -> Self {
        self.screenshot = Some(screenshot);
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Result<Self> {
        if timeout_ms == 0 {
            return Err(Error::InvalidScenario(
                "timeout must be a positive number of milliseconds".to_string(),
            ));
        }
        self.timeout = Some(timeout_ms);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.browser.is_none()
            && self.headless.is_none()
            && self.screenshot.is_none()
            && self.timeout.is_none()
    }

    pub fn effective_headless(&self) -> bool {
        self.headless.unwrap_or(true)
    }

    pub fn effective_screenshot(&self) -> bool {
        self.screenshot.unwrap_or(false)
    }

    pub fn effective_timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout == Some(0) {
            return Err(Error::InvalidScenario(
                "timeout must be a positive number of milliseconds".to_string(),
            ));
        }
        Ok(())
    }
}

/// A natural-language description of the behavior to test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl Scenario {
    /// Create a scenario, rejecting blank descriptions
    pub fn new(description: impl Into<String>) -> Result<Self> {
        let scenario = Self {
            description: description.into(),
            url: None,
            options: None,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_options(mut self, options: Options) -> Result<Self> {
        options.validate()?;
        self.options = Some(options);
        Ok(self)
    }

    /// Check the invariants a scenario must hold before compilation
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::InvalidScenario(
                "description must not be empty".to_string(),
            ));
        }
        if let Some(options) = &self.options {
            options.validate()?;
        }
        Ok(())
    }

    /// Parse a scenario from YAML (JSON is accepted as a YAML subset)
    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Provider-agnostic prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Test code produced by a generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTest {
    /// Extracted source; empty when the completion had no code block
    pub code: String,

    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl GeneratedTest {
    pub fn has_code(&self) -> bool {
        is_code_present(&self.code)
    }
}

/// Whitespace-only code counts as no code
pub fn is_code_present(code: &str) -> bool {
    !code.trim().is_empty()
}

/// Timestamp-derived artifact name, e.g. `test-1700000000000.spec.ts`
pub fn default_test_filename(unix_millis: i64) -> String {
    format!("test-{}{}", unix_millis, SPEC_EXTENSION)
}

/// Outcome of one execution of the test engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub success: bool,
    pub duration_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<PathBuf>,

    /// Chronological log entries; only ever appended to
    #[serde(default)]
    pub logs: Vec<String>,
}

impl TestResult {
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.logs.push(entry.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_parse_and_display() {
        assert_eq!("Firefox".parse::<Browser>().unwrap(), Browser::Firefox);
        assert_eq!(Browser::Webkit.to_string(), "webkit");
        assert!("safari".parse::<Browser>().is_err());
    }

    #[test]
    fn test_scenario_rejects_blank_description() {
        assert!(matches!(Scenario::new("   "), Err(Error::InvalidScenario(_))));
        assert!(Scenario::new("log in and see the dashboard").is_ok());
    }

    #[test]
    fn test_options_reject_zero_timeout() {
        assert!(Options::new().with_timeout(0).is_err());
        assert_eq!(Options::new().with_timeout(5000).unwrap().timeout, Some(5000));
    }

    #[test]
    fn test_options_effective_defaults() {
        let options = Options::new();
        assert!(options.is_empty());
        assert!(options.effective_headless());
        assert!(!options.effective_screenshot());
        assert_eq!(options.effective_timeout(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_scenario_from_yaml() {
        let yaml = r#"
description: Add an item to the cart
url: https://shop.example.com
options:
  browser: webkit
  headless: false
  timeout: 45000
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.url.as_deref(), Some("https://shop.example.com"));
        let options = scenario.options.unwrap();
        assert_eq!(options.browser, Some(Browser::Webkit));
        assert_eq!(options.headless, Some(false));
        assert_eq!(options.screenshot, None);
        assert_eq!(options.timeout, Some(45000));
    }

    #[test]
    fn test_scenario_from_yaml_rejects_zero_timeout() {
        let yaml = "description: x\noptions:\n  timeout: 0\n";
        assert!(matches!(
            Scenario::from_yaml(yaml),
            Err(Error::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_whitespace_only_code_is_not_code() {
        let test = GeneratedTest {
            code: "  \n\t\n".to_string(),
            filename: "a.spec.ts".to_string(),
            explanation: None,
        };
        assert!(!test.has_code());
        assert!(is_code_present("test();\n"));
    }

    #[test]
    fn test_default_test_filename() {
        assert_eq!(default_test_filename(42), "test-42.spec.ts");
    }
}
