use super::ResponseGenerator;
use crate::config::ModelConfig;
use crate::error::GenieError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Text-completion backend speaking the OpenAI-compatible `/v1/completions`
/// API, as served by Ollama or vLLM hosting the fine-tuned recipe model.
pub struct CompletionGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_tokens: u32,
}

impl CompletionGenerator {
    /// Create a new completion generator from configuration
    pub fn new(config: &ModelConfig) -> Result<Self, GenieError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(CompletionGenerator {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        let defaults = ModelConfig::default();
        CompletionGenerator {
            client: Client::new(),
            base_url,
            api_key: None,
            model,
            temperature: defaults.temperature,
            top_p: defaults.top_p,
            top_k: defaults.top_k,
            max_tokens: defaults.max_tokens,
        }
    }
}

#[async_trait]
impl ResponseGenerator for CompletionGenerator {
    fn name(&self) -> &str {
        "completion"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenieError> {
        let mut request = self
            .client
            .post(format!("{}/v1/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "temperature": self.temperature,
                "top_p": self.top_p,
                "top_k": self.top_k,
                "max_tokens": self.max_tokens,
                "n": 1
            }));
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await?;
        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("Completion response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_message = error
                .as_str()
                .unwrap_or_else(|| error["message"].as_str().unwrap_or("Unknown error"));
            return Err(GenieError::GeneratorResponse(error_message.to_string()));
        }

        if !status.is_success() {
            return Err(GenieError::GeneratorResponse(format!(
                "backend returned status {}",
                status
            )));
        }

        response_body["choices"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                GenieError::GeneratorResponse(format!(
                    "Failed to extract text from completion response. Response: {}",
                    response_body
                ))
            })
    }
}
