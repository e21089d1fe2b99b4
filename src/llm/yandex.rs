use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Completion, CompletionProvider};
use crate::prompt::ConversationMessage;

/// Client for the Yandex Foundation Models text completion API.
#[derive(Debug, Clone)]
pub struct YandexGptClient {
    client: reqwest::Client,
    api_key: String,
    model_uri: String,
    base_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    model_uri: &'a str,
    completion_options: CompletionOptions,
    messages: &'a [ConversationMessage],
}

#[derive(Debug, Clone, Serialize)]
struct CompletionOptions {
    stream: bool,
    temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct CompletionResponse {
    result: CompletionResult,
}

#[derive(Debug, Clone, Deserialize)]
struct CompletionResult {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Deserialize)]
struct Alternative {
    message: AlternativeMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct AlternativeMessage {
    #[serde(default)]
    text: String,
}

impl YandexGptClient {
    pub fn new(api_key: &str, folder_id: &str, model: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model_uri: format!("gpt://{}/{}", folder_id, model),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for YandexGptClient {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        temperature: f64,
    ) -> Result<Completion> {
        let request = CompletionRequest {
            model_uri: &self.model_uri,
            completion_options: CompletionOptions {
                stream: false,
                temperature,
            },
            messages,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Api-Key {}", &self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to completion API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Completion API error ({}): {}", status, body);
        }

        let api_response: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion API response")?;

        let text = api_response
            .result
            .alternatives
            .first()
            .map(|a| a.message.text.clone())
            .unwrap_or_default();

        Ok(Completion { text })
    }
}
