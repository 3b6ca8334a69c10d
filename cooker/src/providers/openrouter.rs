use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use strum::{AsRefStr, EnumString};

use super::core::{AiProvider, ChatMessage, CompletionRequest};
use crate::config::ForecastConfig;

#[derive(Default, Debug, EnumString, AsRefStr, PartialEq, Eq)]
pub enum OpenRouterModel {
    #[default]
    #[strum(serialize = "google/gemini-2.0-flash-001")]
    Gemini2Flash,
    #[strum(serialize = "google/gemini-2.0-flash-lite-001")]
    Gemini2FlashLite,
    #[strum(serialize = "openai/gpt-4o-mini")]
    Gpt4oMini,
}

#[derive(Serialize, Debug)]
struct ChatCompletionPayload<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Chat-completions client for OpenRouter or any OpenAI-compatible endpoint.
pub struct OpenRouterProvider {
    pub client: Arc<Client>,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl OpenRouterProvider {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(OpenRouterProvider {
            client: Arc::new(client),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

impl AiProvider for OpenRouterProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
        let url = format!("{}/chat/completions", self.api_url);
        let payload = ChatCompletionPayload {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        debug!(
            "Sending {} messages to {} (model: {})",
            request.messages.len(),
            url,
            self.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to completion endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Completion request failed: Status: {}, Body: {}", status, body);
        }

        let raw_text_response = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&raw_text_response)
            .map_err(|e| anyhow!("Failed to deserialize completion response: {}", e))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion {:?} used {} tokens ({} prompt, {} completion)",
                completion.id, usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
