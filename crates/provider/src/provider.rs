//! Generation provider abstraction
//!
//! Both backends accept a [`Prompt`] and return one completion string, so
//! everything downstream is unaware of which wire format was used.

use async_trait::async_trait;
use specwright_common::config::{ProviderKind, ProviderSettings};
use specwright_common::{Prompt, Result};

use crate::backends::{HostedProvider, LocalProvider};

/// A backend that turns a prompt into completion text
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Send the prompt and return the normalized completion.
    ///
    /// Fails with a configuration error before any request when a required
    /// credential or endpoint is missing, and with a provider error when the
    /// backend answers unsuccessfully or cannot be reached. Single attempt.
    async fn generate(&self, prompt: &Prompt) -> Result<String>;
}

/// Build the backend selected by the settings
pub fn from_settings(settings: &ProviderSettings) -> Box<dyn Provider> {
    match settings.kind {
        ProviderKind::Hosted => Box::new(HostedProvider::new(settings)),
        ProviderKind::Local => Box::new(LocalProvider::new(settings)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_selects_backend() {
        let mut settings = ProviderSettings::default();
        assert_eq!(from_settings(&settings).name(), "hosted");

        settings.kind = ProviderKind::Local;
        assert_eq!(from_settings(&settings).name(), "local");
    }
}
