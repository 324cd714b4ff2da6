//! Error types for Specwright

use thiserror::Error;

/// Result type alias using Specwright Error
pub type Result<T> = std::result::Result<T, Error>;

/// Specwright error types
///
/// Every variant carries a human-readable message. A test run that executes
/// but fails is not an error; it is reported through `TestResult`.
#[derive(Error, Debug)]
pub enum Error {
    /// A required credential or endpoint is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The generation backend answered with a failure or could not be reached
    #[error("Provider error: {0}")]
    Provider(String),

    /// The artifacts directory or file could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    /// The execution engine could not be started
    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}
