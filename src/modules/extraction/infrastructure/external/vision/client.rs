/// Reqwest-based client for the vision inference API
use crate::modules::extraction::domain::ports::InferenceClient;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{RateLimiter, RetryConfig, RetryUtil};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::dto::{ChatRequest, ChatResponse};

/// Bounded completion budget: one card's fields fit comfortably
const MAX_COMPLETION_TOKENS: u32 = 500;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl VisionConfig {
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var("VISION_API_KEY").map_err(|_| {
            AppError::InvalidInput("VISION_API_KEY environment variable not found".to_string())
        })?;

        Ok(Self {
            base_url: env::var("VISION_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key,
            model: env::var("VISION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        })
    }
}

pub struct VisionClient {
    client: Client,
    config: VisionConfig,
    rate_limiter: Arc<RateLimiter>,
    retry_config: RetryConfig,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Deckscan/1.0")
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            // Keep a little headroom below typical vision-tier limits
            rate_limiter: Arc::new(RateLimiter::new(1.0)),
            retry_config: RetryConfig::conservative(),
        })
    }

    fn handle_response_status(status: StatusCode) -> AppResult<()> {
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitError(
                "Vision API rate limit exceeded".to_string(),
            )),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::ApiError(
                "Unauthorized access to vision API".to_string(),
            )),
            StatusCode::BAD_REQUEST => {
                Err(AppError::ApiError("Bad request to vision API".to_string()))
            }
            _ if status.is_server_error() => Err(AppError::ExternalServiceError(
                "Vision API service unavailable".to_string(),
            )),
            _ => Err(AppError::ApiError(format!(
                "Unexpected status code from vision API: {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl InferenceClient for VisionClient {
    async fn extract(&self, prompt: &str, image_urls: &[String]) -> AppResult<String> {
        self.rate_limiter.wait().await?;

        let request = ChatRequest::vision(
            &self.config.model,
            prompt,
            image_urls,
            MAX_COMPLETION_TOKENS,
        );
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!("Vision extract: {} image(s), model {}", image_urls.len(), self.config.model);

        let response = RetryUtil::retry_http_request(
            || {
                self.client
                    .post(&url)
                    .bearer_auth(&self.config.api_key)
                    .json(&request)
                    .send()
            },
            &self.retry_config,
            "vision extract",
        )
        .await?;

        Self::handle_response_status(response.status())?;

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AppError::ApiError(format!("Failed to parse vision response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::ApiError("Vision response contained no completion".to_string()))
    }
}
