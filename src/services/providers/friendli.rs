/// Friendli serverless chat completions provider
///
/// Speaks the OpenAI-compatible `chat/completions` wire format, so any
/// compatible endpoint can be configured through `FRIENDLI_API_URL`.
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::{ChatPrompt, TextGenerator},
};

const RETRY_BASE_DELAY_MS: u64 = 250;
const RETRY_MAX_DELAY_MS: u64 = 4_000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
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

#[derive(Clone)]
pub struct FriendliClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    max_retries: u32,
}

impl FriendliClient {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
        max_retries: u32,
    ) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "FRIENDLI_API_KEY must not be empty".to_string(),
            ));
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
            max_retries,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.friendli_api_key.clone(),
            config.friendli_api_url.clone(),
            config.friendli_model.clone(),
            config.friendli_timeout(),
            config.friendli_max_retries,
        )
    }

    async fn send_once(&self, prompt: &ChatPrompt) -> Result<String, Failure> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: prompt.temperature,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Failure::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AppError::ExternalApi(format!("API returned status {}: {}", status, body));
            return Err(Failure {
                retryable: status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
                error,
            });
        }

        let completion: ChatResponse = response.json().await.map_err(Failure::from_transport)?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| Failure {
                retryable: false,
                error: AppError::ExternalApi("API response contained no choices".to_string()),
            })
    }
}

/// A failed attempt, tagged with whether another attempt may succeed
struct Failure {
    retryable: bool,
    error: AppError,
}

impl Failure {
    fn from_transport(e: reqwest::Error) -> Self {
        Self {
            retryable: e.is_timeout() || e.is_connect() || e.is_request(),
            error: AppError::HttpClient(e),
        }
    }
}

fn retry_delay(attempt: u32) -> Duration {
    let exponential = RETRY_BASE_DELAY_MS.saturating_mul(1_u64 << attempt.min(16));
    Duration::from_millis(exponential.min(RETRY_MAX_DELAY_MS))
}

#[async_trait::async_trait]
impl TextGenerator for FriendliClient {
    async fn generate(&self, prompt: &ChatPrompt) -> AppResult<String> {
        let mut attempt = 0;

        loop {
            match self.send_once(prompt).await {
                Ok(content) => {
                    tracing::debug!(
                        provider = self.name(),
                        attempt = attempt + 1,
                        chars = content.len(),
                        "Text generation completed"
                    );
                    return Ok(content);
                }
                Err(failure) if failure.retryable && attempt < self.max_retries => {
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        provider = self.name(),
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure.error,
                        "Text generation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => {
                    tracing::error!(
                        provider = self.name(),
                        error = %failure.error,
                        "Text generation failed"
                    );
                    return Err(failure.error);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "friendli"
    }
}
