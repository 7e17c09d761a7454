/// HTTP client for the external object store's URL-signing endpoint
///
/// The store persists and serves the image bytes; this system only ever
/// exchanges a storage path for a time-limited signed URL.
use crate::modules::extraction::domain::ports::ObjectStore;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub base_url: String,
    pub api_key: String,
}

impl StorageConfig {
    pub fn from_env() -> AppResult<Self> {
        let base_url = env::var("STORAGE_API_URL").map_err(|_| {
            AppError::InvalidInput("STORAGE_API_URL environment variable not found".to_string())
        })?;
        let api_key = env::var("STORAGE_API_KEY").map_err(|_| {
            AppError::InvalidInput("STORAGE_API_KEY environment variable not found".to_string())
        })?;

        Ok(Self { base_url, api_key })
    }
}

#[derive(Serialize, Debug)]
struct SignRequest {
    #[serde(rename = "expiresIn")]
    expires_in: u64,
}

#[derive(Deserialize, Debug)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

pub struct StorageClient {
    client: Client,
    config: StorageConfig,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Deckscan/1.0")
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn signed_url(&self, storage_path: &str, ttl: Duration) -> AppResult<String> {
        let url = format!(
            "{}/object/sign/{}",
            self.config.base_url,
            urlencoding::encode(storage_path)
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&SignRequest {
                expires_in: ttl.as_secs(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Object store sign request failed with status {}",
                response.status()
            )));
        }

        let parsed: SignResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse sign response: {}", e))
        })?;

        // The store returns a path relative to its own host
        Ok(format!("{}{}", self.config.base_url, parsed.signed_url))
    }
}
