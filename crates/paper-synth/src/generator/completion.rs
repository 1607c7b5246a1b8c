//! OpenAI-compatible completion backend.

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

use super::{DecodingPolicy, TextGenerator};
use crate::client::middleware;
use crate::config::Config;
use crate::error::{GenerationError, GenerationResult};

/// Body of `POST /v1/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub n: u32,
    pub echo: bool,
    /// Backend extension; ignored by servers that do not implement it.
    pub no_repeat_ngram_size: u32,
    pub skip_special_tokens: bool,
}

/// Response of `POST /v1/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelCard>,
}

#[derive(Debug, Deserialize)]
struct ModelCard {
    id: String,
}

/// Generator backed by an inference server speaking the OpenAI completion API.
#[derive(Clone)]
pub struct CompletionGenerator {
    client: ClientWithMiddleware,
    base_url: String,
    model: String,
    policy: DecodingPolicy,
}

impl CompletionGenerator {
    /// Connect to the backend and make sure the configured model is served.
    ///
    /// Called once at startup; a failure here is fatal for the process.
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unreachable or does not serve the model.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let client = middleware::build_client(
            config.generation_timeout,
            config.connect_timeout,
            config.max_retries,
        )?;

        let generator = Self {
            client,
            base_url: config.generator_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            policy: DecodingPolicy::PAPER,
        };

        generator.verify_model().await?;

        tracing::info!(
            model = %generator.model,
            backend = %generator.base_url,
            "Model backend ready"
        );

        Ok(generator)
    }

    /// Model served by this generator.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn verify_model(&self) -> GenerationResult<()> {
        let url = format!("{}/v1/models", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        let models: ModelList = serde_json::from_str(&body)?;

        if models.data.iter().any(|m| m.id == self.model) {
            return Ok(());
        }

        Err(GenerationError::ModelUnavailable {
            model: self.model.clone(),
            available: models.data.iter().map(|m| m.id.as_str()).collect::<Vec<_>>().join(", "),
        })
    }
}

#[async_trait::async_trait]
impl TextGenerator for CompletionGenerator {
    async fn generate(&self, prompt: &str, max_length: u32) -> GenerationResult<String> {
        let url = format!("{}/v1/completions", self.base_url);

        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: max_length,
            temperature: self.policy.temperature,
            n: self.policy.num_return_sequences,
            echo: self.policy.echo_prompt,
            no_repeat_ngram_size: self.policy.no_repeat_ngram_size,
            skip_special_tokens: self.policy.skip_special_tokens,
        };
        let body = serde_json::to_string(&request)?;

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        let completion: CompletionResponse = serde_json::from_str(&body)?;

        let choice =
            completion.choices.into_iter().next().ok_or(GenerationError::EmptyResponse)?;

        tracing::debug!(
            chars = choice.text.len(),
            finish_reason = ?choice.finish_reason,
            "Completion received"
        );

        Ok(choice.text)
    }
}

async fn check_status(response: reqwest::Response) -> GenerationResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(GenerationError::status(status.as_u16(), text))
}

impl std::fmt::Debug for CompletionGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}
