//! Local backend speaking the OpenAI-compatible chat completions API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use specwright_common::config::{ProviderSettings, ENV_LOCAL_URL};
use specwright_common::{Error, Prompt, Result};
use tracing::{debug, info};

use crate::client::send_json;
use crate::provider::Provider;

/// Path appended to the configured base URL
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Local text-generation backend (LM Studio, llama.cpp server, Ollama, ...)
pub struct LocalProvider {
    http_client: reqwest::Client,
    base_url: Option<String>,
    model: String,
    max_tokens: u32,
}

impl LocalProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: settings.local_url.clone(),
            model: settings.local_model.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    fn endpoint(&self) -> Result<String> {
        let base_url = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "{} is not set; it is required for the local backend",
                    ENV_LOCAL_URL
                ))
            })?;
        Ok(format!("{}{}", base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH))
    }
}

#[async_trait]
impl Provider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let endpoint = self.endpoint()?;

        let body = ChatRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        debug!(endpoint = %endpoint, "Sending local generation request");

        let request = self.http_client.post(&endpoint).json(&body);
        let response: ChatResponse = send_json(request, &endpoint).await?;

        let completion = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Provider("Response contained no choices".to_string()))?;

        info!("Received completion from local backend ({} chars)", completion.len());
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let mut settings = ProviderSettings::default();
        settings.local_url = Some("http://localhost:1234/".to_string());
        let provider = LocalProvider::new(&settings);
        assert_eq!(
            provider.endpoint().unwrap(),
            "http://localhost:1234/v1/chat/completions"
        );
    }
}
