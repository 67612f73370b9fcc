//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::capability::TextCompleter;
use crate::config::CompletionConfig;
use crate::{Result, WfaError};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Env var that short-circuits every completion with a fixed response.
pub const MOCK_COMPLETION_ENV: &str = "WFA_MOCK_COMPLETION";

const SYSTEM_PROMPT: &str = "You are a UX engineer who produces low-fidelity HTML wireframes. \
Reply with a single self-contained HTML document and nothing else.";

/// Connection settings for [`HttpTextCompleter`].
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

impl CompletionSettings {
    /// Create settings from environment variables.
    pub fn from_env() -> Option<Self> {
        Self::from_config(&CompletionConfig::default())
    }

    /// Config file values first, env vars as fallback.
    /// Returns None if no API key is available from either source.
    pub fn from_config(config: &CompletionConfig) -> Option<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("WFA_COMPLETION_API_KEY").ok())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())?;

        let api_endpoint = config
            .api_endpoint
            .clone()
            .or_else(|| std::env::var("WFA_COMPLETION_ENDPOINT").ok())
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = config
            .model
            .clone()
            .or_else(|| std::env::var("WFA_COMPLETION_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Some(Self {
            api_endpoint,
            api_key,
            model,
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }
}

pub struct HttpTextCompleter {
    settings: CompletionSettings,
    client: reqwest::Client,
}

impl HttpTextCompleter {
    pub fn new(settings: CompletionSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &CompletionConfig) -> Option<Self> {
        CompletionSettings::from_config(config).map(Self::new)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl TextCompleter for HttpTextCompleter {
    async fn complete_text(&self, prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": self.settings.max_tokens,
        });

        tracing::debug!(model = %self.settings.model, prompt_len = prompt.len(), "requesting completion");

        let response = self
            .client
            .post(&self.settings.api_endpoint)
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WfaError::completion(Some(status), body));
        }

        let resp: ChatResponse = response.json().await?;
        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| WfaError::completion(None, "response contained no choices"))
    }
}

/// Returns a canned response; used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct StaticTextCompleter {
    response: String,
}

impl StaticTextCompleter {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// Built from `WFA_MOCK_COMPLETION` when set.
    pub fn from_env() -> Option<Self> {
        std::env::var(MOCK_COMPLETION_ENV).ok().map(Self::new)
    }
}

#[async_trait]
impl TextCompleter for StaticTextCompleter {
    async fn complete_text(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}
