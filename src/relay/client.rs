//! HTTP client for the text-completion provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::RelayError;

/// Fixed sampling parameters; every request uses these, unconditionally.
pub const TEMPERATURE: f64 = 0.6;
pub const MAX_TOKENS: u32 = 2048;

#[derive(Serialize, Debug)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
pub struct CompletionChoice {
    pub text: Option<String>,
}

/// Seam between the HTTP handler and the completion provider, so the
/// handler can be exercised without a network.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issues one completion call and returns the first choice's raw text,
    /// or `None` when the provider returned no usable choice.
    async fn complete(&self, prompt: &str) -> Result<Option<String>, RelayError>;
}

pub struct OpenAiClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        // No local timeout: whatever the network stack and the provider
        // enforce is the timeout behavior.
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn request_body(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, RelayError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::UpstreamStatus { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion.choices.into_iter().next().and_then(|choice| choice.text))
    }
}
