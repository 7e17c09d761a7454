use crate::shared::errors::{AppError, AppResult};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration for external API calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Conservative retry config for production use
    pub fn conservative() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.5,
            jitter: true,
        }
    }
}

/// Retry utility for external API calls with exponential backoff
pub struct RetryUtil;

impl RetryUtil {
    /// Execute a function with retry logic and exponential backoff
    pub async fn with_retry<F, Fut, T>(
        operation: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "{} succeeded on attempt {} after {} retries",
                            operation_name,
                            attempt + 1,
                            attempt
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    last_error = Some(error.clone());

                    if !Self::is_retryable_error(&error) {
                        debug!(
                            "{} failed with non-retryable error: {}",
                            operation_name, error
                        );
                        return Err(error);
                    }

                    // Don't wait after the last attempt
                    if attempt < config.max_retries {
                        let delay = Self::calculate_delay(attempt, config);
                        warn!(
                            "{} failed on attempt {} ({}), retrying in {:?}",
                            operation_name,
                            attempt + 1,
                            error,
                            delay
                        );
                        sleep(delay).await;
                    } else {
                        warn!(
                            "{} failed on final attempt {} ({}), giving up",
                            operation_name,
                            attempt + 1,
                            error
                        );
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::ExternalServiceError("All retries exhausted".to_string())))
    }

    /// Calculate delay for the given attempt with exponential backoff and jitter
    fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
        let exponential_delay =
            config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi(attempt as i32);

        let mut delay = Duration::from_millis(exponential_delay as u64);

        if delay > config.max_delay {
            delay = config.max_delay;
        }

        // Jitter prevents thundering herd on shared upstreams
        if config.jitter {
            let jitter_factor = 0.1;
            let jitter_ms =
                (delay.as_millis() as f64 * jitter_factor * rand::random::<f64>()) as u64;
            delay = Duration::from_millis(delay.as_millis() as u64 + jitter_ms);
        }

        delay
    }

    /// Determine if an error should trigger a retry
    fn is_retryable_error(error: &AppError) -> bool {
        match error {
            // Network-related errors - usually temporary
            AppError::ExternalServiceError(_) => true,

            // Rate limiting - retry with backoff
            AppError::RateLimitError(_) => true,

            AppError::ApiError(msg) => {
                !msg.to_lowercase().contains("not found")
                    && !msg.to_lowercase().contains("unauthorized")
                    && !msg.to_lowercase().contains("forbidden")
                    && !msg.to_lowercase().contains("bad request")
            }

            AppError::ValidationError(_) | AppError::InvalidInput(_) | AppError::NotFound(_) => {
                false
            }

            AppError::InternalError(_) | AppError::SerializationError(_) => true,

            AppError::DatabaseError(_) => true,
        }
    }

    /// Retry specifically for HTTP requests with status code analysis
    pub async fn retry_http_request<F, Fut>(
        request_fn: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        Self::with_retry(
            || async {
                match request_fn().await {
                    Ok(response) => {
                        let status = response.status();
                        if Self::is_retryable_status(status) {
                            Err(Self::status_to_app_error(status))
                        } else {
                            Ok(response)
                        }
                    }
                    Err(e) => Err(AppError::ExternalServiceError(format!(
                        "HTTP request failed: {}",
                        e
                    ))),
                }
            },
            config,
            operation_name,
        )
        .await
    }

    /// Check if HTTP status code indicates a retryable error
    fn is_retryable_status(status: StatusCode) -> bool {
        match status {
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => true,

            StatusCode::TOO_MANY_REQUESTS => true,

            StatusCode::REQUEST_TIMEOUT => true,

            _ => false,
        }
    }

    /// Convert HTTP status to appropriate AppError
    fn status_to_app_error(status: StatusCode) -> AppError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::RateLimitError("Rate limit exceeded".to_string())
            }
            StatusCode::NOT_FOUND => AppError::NotFound("Resource not found".to_string()),
            StatusCode::UNAUTHORIZED => AppError::ApiError("Unauthorized access".to_string()),
            StatusCode::FORBIDDEN => AppError::ApiError("Access forbidden".to_string()),
            StatusCode::BAD_REQUEST => AppError::ApiError("Bad request".to_string()),
            _ if status.is_server_error() => {
                AppError::ExternalServiceError(format!("Server error: {}", status))
            }
            _ => AppError::ApiError(format!("HTTP error: {}", status)),
        }
    }
}
