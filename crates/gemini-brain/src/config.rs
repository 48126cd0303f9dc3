//! Configuration for GeminiBrain.

use std::env;
use std::time::Duration;

use brain_core::BrainError;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for GeminiBrain.
#[derive(Debug, Clone)]
pub struct GeminiBrainConfig {
    /// Gemini API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system instruction.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Upper bound on a single HTTP round trip.
    pub request_timeout: Duration,
}

impl Default for GeminiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl GeminiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Model name (default: gemini-1.5-flash)
    /// - `GEMINI_SYSTEM_PROMPT` - System instruction
    /// - `GEMINI_MAX_TOKENS` - Max output tokens (default: 1024)
    /// - `GEMINI_TEMPERATURE` - Temperature (default: 0.7)
    /// - `GEMINI_REQUEST_TIMEOUT_SECS` - HTTP timeout (default: 60)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BrainError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let system_prompt = env::var("GEMINI_SYSTEM_PROMPT")
            .ok()
            .map(|prompt| prompt.trim().to_string())
            .filter(|prompt| !prompt.is_empty());

        let max_tokens = env::var("GEMINI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let request_timeout = env::var("GEMINI_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiBrainConfigBuilder {
        GeminiBrainConfigBuilder::default()
    }
}

/// Builder for GeminiBrainConfig.
#[derive(Debug, Default)]
pub struct GeminiBrainConfigBuilder {
    config: GeminiBrainConfig,
}

impl GeminiBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system instruction.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max output tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiBrainConfig {
        self.config
    }
}
