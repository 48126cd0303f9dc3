//! GeminiBrain implementation using the Gemini REST API.

use brain_core::{async_trait, Brain, BrainError, Turn};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiBrainConfig;

/// A completion backend that calls Google's Gemini API.
///
/// Stateless: every call carries the whole transcript, so the same instance
/// can serve any number of concurrent conversations.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("Gemini API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!("GeminiBrain initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GeminiBrain from environment variables.
    ///
    /// See [`GeminiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(GeminiBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    /// Build the request body for a transcript.
    fn build_request(&self, turns: &[Turn]) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: turns.iter().map(Content::from).collect(),
            system_instruction: self.config.system_prompt.as_deref().map(Content::system),
            generation_config: Some(GenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            }),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Make a generateContent request to the Gemini API.
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BrainError> {
        let url = self.endpoint();

        debug!(contents = request.contents.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BrainError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for GeminiBrain {
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>, BrainError> {
        if turns.is_empty() {
            return Err(BrainError::ProcessingFailed("empty transcript".to_string()));
        }

        let request = self.build_request(turns);
        let response = self.generate(&request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt = ?usage.prompt_token_count,
                completion = ?usage.candidates_token_count,
                total = ?usage.total_token_count,
                "Gemini token usage"
            );
        }

        Ok(response.first_text())
    }

    fn name(&self) -> &str {
        "GeminiBrain"
    }
}
