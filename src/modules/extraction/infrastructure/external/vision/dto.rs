/// Wire types for the vision chat-completions API
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize, Debug)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageRef },
}

#[derive(Serialize, Debug)]
pub struct ImageRef {
    pub url: String,
}

impl ChatRequest {
    /// One user message carrying the prompt and every image reference
    pub fn vision(
        model: &str,
        prompt: &str,
        image_urls: &[String],
        max_tokens: u32,
    ) -> Self {
        let mut content = vec![ContentPart::Text {
            text: prompt.to_string(),
        }];
        content.extend(image_urls.iter().map(|url| ContentPart::ImageUrl {
            image_url: ImageRef { url: url.clone() },
        }));

        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
            max_tokens,
            temperature: 0.0,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}
