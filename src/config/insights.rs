use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote text-generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Try the remote strategy before the fallback
    pub remote_enabled: bool,

    /// OpenAI-compatible chat-completions URL
    pub endpoint: String,

    pub model: String,

    /// Name of the environment variable holding the bearer token
    pub api_key_env: String,

    /// Upper bound on a single remote call, in seconds (1-120)
    pub timeout_secs: u64,

    /// Sampling temperature (0.0-2.0)
    pub temperature: f64,

    pub max_tokens: u32,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            remote_enabled: true,
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama3-70b-8192".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            // Default: 10 seconds
            timeout_secs: 10,
            // Default: low temperature for stable JSON
            temperature: 0.3,
            max_tokens: 700,
        }
    }
}

impl InsightsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("insights.endpoint must not be empty".to_string());
        }
        if !(1..=120).contains(&self.timeout_secs) {
            return Err(format!(
                "insights.timeout_secs must be between 1 and 120, got {}",
                self.timeout_secs
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "insights.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err("insights.max_tokens must be at least 1".to_string());
        }
        Ok(())
    }
}
