//! Hosted backend speaking the Anthropic Messages API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use specwright_common::config::{ProviderSettings, ENV_API_KEY};
use specwright_common::{Error, Prompt, Result};
use tracing::{debug, info};

use crate::client::send_json;
use crate::provider::Provider;

/// API version header sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Hosted text-generation backend
pub struct HostedProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl HostedProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: settings.hosted_endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "{} is not set; it is required for the hosted backend",
                    ENV_API_KEY
                ))
            })
    }
}

#[async_trait]
impl Provider for HostedProvider {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let api_key = self.api_key()?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &prompt.system,
            messages: [Message {
                role: "user",
                content: &prompt.user,
            }],
        };

        debug!(model = %self.model, endpoint = %self.endpoint, "Sending hosted generation request");

        let request = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(request, &self.endpoint).await?;

        let completion = response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| Error::Provider("Response contained no text content".to_string()))?;

        info!("Received completion from hosted backend ({} chars)", completion.len());
        Ok(completion)
    }
}
