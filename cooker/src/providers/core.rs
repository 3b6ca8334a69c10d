use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A persona plus one prompt, sampled at a fixed temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system_instruction: &str, prompt: &str, temperature: f32) -> Self {
        CompletionRequest {
            messages: vec![ChatMessage::system(system_instruction), ChatMessage::user(prompt)],
            temperature,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait AiProvider {
    /// Text of the first completion choice, `None` when the provider sent no content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>>;
}
