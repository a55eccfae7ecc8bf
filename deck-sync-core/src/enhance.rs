//! # Card enhancement via a chat-completions API
//!
//! [`OpenAiEnhancer`] sends one card per request and asks for a strict JSON
//! object `{ "front": ..., "back": ... }` back. The API key is checked before
//! any network attempt; a missing key yields [`EnhanceError::Configuration`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::EnhancementConfig;
use crate::contract::{Enhancer, PromptConfig};
use crate::error::EnhanceError;
use crate::model::Card;

/// The content the service must return, and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnhancedContent {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

pub struct OpenAiEnhancer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiEnhancer {
    pub fn new(config: &EnhancementConfig, api_key: Option<String>) -> Self {
        tracing::info!(
            endpoint = %config.endpoint,
            model = %config.model,
            api_key_set = api_key.as_deref().is_some_and(|k| !k.is_empty()),
            "Initialized enhancement client"
        );
        OpenAiEnhancer {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, EnhanceError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(EnhanceError::Configuration(
                "enhancement API key is not set".to_string(),
            )),
        }
    }
}

/// The chat-completions request body for one card.
pub fn completion_request(model: &str, card: &Card, prompt: &PromptConfig) -> serde_json::Value {
    let user_message = format!(
        "This is the given content of the flashcard:\nFront: {}\nBack: {}\n\n\
         Please respond only with a JSON object with the enhanced \"front\" and \"back\".",
        card.front, card.back
    );
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": prompt.system_prompt },
            { "role": "user", "content": user_message }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "flashcard",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "front": { "type": "string" },
                        "back": { "type": "string" }
                    },
                    "required": ["front", "back"],
                    "additionalProperties": false
                }
            }
        }
    })
}

/// Decodes the first choice's content of a completion body as [`EnhancedContent`].
pub fn parse_completion(body: &str) -> Result<EnhancedContent, EnhanceError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| EnhanceError::Malformed(format!("unexpected completion body: {e}")))?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| EnhanceError::Malformed("completion has no content".to_string()))?;
    let enhanced: EnhancedContent = serde_json::from_str(&content)
        .map_err(|e| EnhanceError::Malformed(format!("content is not a front/back object: {e}")))?;
    if enhanced.front.trim().is_empty() {
        return Err(EnhanceError::Malformed("enhanced front is empty".to_string()));
    }
    Ok(enhanced)
}

#[async_trait]
impl Enhancer for OpenAiEnhancer {
    async fn enhance(&self, card: &Card, prompt: &PromptConfig) -> Result<Card, EnhanceError> {
        let api_key = self.api_key()?;
        tracing::info!(front = %card.front, model = %self.model, "Enhancing card");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&completion_request(&self.model, card, prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = %status, front = %card.front, "Enhancement request failed");
            return Err(EnhanceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let enhanced = parse_completion(&body)?;
        tracing::debug!(front = %enhanced.front, back = %enhanced.back, "Received enhanced card");
        Ok(card.with_content(enhanced.front, enhanced.back))
    }
}
