//! The text-generation collaborator behind the remote insight strategy.

use crate::config::InsightsConfig;
use crate::core::InsightError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a respiratory health analyst for the Breathometer app. \
Answer with a single JSON object and nothing else. No markdown, no emojis.";

/// Turns a prompt into raw model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, InsightError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completions endpoint (Groq by default).
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl ChatCompletionsClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("breathometer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InsightError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: 0.3,
            max_tokens: 700,
            timeout,
        })
    }

    /// Reads the bearer token from the environment variable the config names.
    pub fn from_config(config: &InsightsConfig) -> Result<Self, InsightError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                InsightError::Unavailable(format!("{} is not set", config.api_key_env))
            })?;

        let mut client = Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.timeout(),
        )?;
        client.temperature = config.temperature;
        client.max_tokens = config.max_tokens;
        Ok(client)
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "Requesting chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InsightError::collaborator(
                Some(status.as_u16()),
                truncate(&detail, 200),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InsightError::malformed(format!("unreadable completion body: {e}")))?;

        extract_content(parsed)
    }
}

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> InsightError {
    if err.is_timeout() {
        InsightError::Timeout { after: timeout }
    } else {
        InsightError::collaborator(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

fn extract_content(response: ChatResponse) -> Result<String, InsightError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| InsightError::malformed("completion has no message content"))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
