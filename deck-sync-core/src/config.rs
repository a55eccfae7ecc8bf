use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::anki::DEFAULT_ENDPOINT;
use crate::contract::PromptConfig;

pub const DEFAULT_DECK: &str = "Default";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_ENHANCEMENT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_PROMPT: &str = "You are an AI assistant that enhances flashcards. Improve the content by making it clearer, more concise, and more effective for learning. Use markdown and always answer in the given language.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub anki: AnkiConfig,
    pub enhancement: EnhancementConfig,
}

impl SyncConfig {
    pub fn trace_loaded(&self) {
        info!(
            anki_endpoint = %self.anki.endpoint,
            default_deck = %self.anki.default_deck,
            enhancement_enabled = self.enhancement.enabled,
            "Loaded SyncConfig"
        );
        debug!(?self, "SyncConfig loaded (full debug)");
    }
}

/// Where the flashcard store lives and which deck to fall back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    pub endpoint: String,
    pub default_deck: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        AnkiConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_deck: DEFAULT_DECK.to_string(),
        }
    }
}

/// Settings of the optional enhancement step. The API key is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub prompt: String,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        EnhancementConfig {
            enabled: false,
            endpoint: DEFAULT_ENHANCEMENT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl EnhancementConfig {
    pub fn prompt_config(&self) -> PromptConfig {
        PromptConfig {
            system_prompt: self.prompt.clone(),
        }
    }
}
