//! Settings loading and the `config` command

use std::path::Path;

use anyhow::{bail, Context};
use specwright_common::config::DEFAULT_CONFIG_FILE;
use specwright_common::Settings;
use tracing::debug;

use crate::output::OutputFormat;

/// Settings file overlaid with the environment.
///
/// An explicit `--config` path must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Settings file not found: {}", path.display());
            }
            path
        }
        None => Path::new(DEFAULT_CONFIG_FILE),
    };

    let mut settings = Settings::load(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    settings.apply_env();
    debug!(provider = ?settings.provider.kind, "Settings resolved");

    Ok(settings)
}

pub fn execute(settings: &Settings, format: OutputFormat) -> anyhow::Result<bool> {
    println!("{}", render(settings, format)?.trim_end());
    Ok(true)
}

/// Settings with the credential masked, as TOML or JSON
fn render(settings: &Settings, format: OutputFormat) -> anyhow::Result<String> {
    let redacted = settings.redacted();

    Ok(match format {
        OutputFormat::Text => toml::to_string_pretty(&redacted)?,
        OutputFormat::Json => serde_json::to_string_pretty(&redacted)?,
    })
}
