use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::web::models::{Message, Role};

/// A hosted chat-completion service.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends one system + user exchange and returns the assistant's text.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String>;

    /// Number of models the provider currently exposes.
    async fn count_models(&self) -> Result<usize>;
}

// Client for the OpenAI-compatible REST API
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        info!(
            "Using completion API at {} with model {}",
            config.base_url, config.model
        );

        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client: Client::new(),
        }
    }

    async fn checked_json(response: reqwest::Response) -> Result<Value> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!(
                "API request failed with {}: {}",
                status,
                error_text
            ));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let messages = vec![
            Message {
                role: Role::System,
                content: system_prompt.to_string(),
            },
            Message {
                role: Role::User,
                content: user_message.to_string(),
            },
        ];

        let payload = json!({
            "model": self.model,
            "messages": messages,
        });

        info!("Sending chat completion request ({} chars)", user_message.len());
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let response_json = Self::checked_json(response).await?;
        debug!("Response JSON: {}", response_json);

        let content = extract_content(&response_json)?;
        info!("Response length: {} characters", content.len());
        Ok(content)
    }

    async fn count_models(&self) -> Result<usize> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response_json = Self::checked_json(response).await?;
        count_entries(&response_json)
    }
}

fn extract_content(response_json: &Value) -> Result<String> {
    response_json
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Failed to extract content from response"))
}

fn count_entries(response_json: &Value) -> Result<usize> {
    response_json
        .get("data")
        .and_then(|data| data.as_array())
        .map(Vec::len)
        .ok_or_else(|| anyhow::anyhow!("Model list response has no data array"))
}
