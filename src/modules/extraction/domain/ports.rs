/// Ports to the external collaborators of the extraction worker
///
/// The object store and the inference API live outside this system; the
/// worker only ever sees these two narrow interfaces.
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Resolve a storage path to a time-limited signed URL
    async fn signed_url(&self, storage_path: &str, ttl: Duration) -> AppResult<String>;
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Submit image references plus a prompt, receive the raw completion text
    ///
    /// The response is free-form: it is expected to contain one JSON object
    /// but nothing guarantees it. Callers parse defensively.
    async fn extract(&self, prompt: &str, image_urls: &[String]) -> AppResult<String>;
}
