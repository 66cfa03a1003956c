//! Blocking chat-completion client
//!
//! One POST per question, no retries. Callers on the UI thread must run
//! [`ChatClient::send_question`] off the main loop.

use std::time::Instant;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::LlmConfig;

pub const SYSTEM_PROMPT: &str = "You are an assistant specialized in solving LeetCode problems.";
pub const MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Please enter or capture the problem text first.")]
    EmptyQuestion,

    #[error("Invalid or unauthorized API key.")]
    Unauthorized,

    #[error("API usage limit reached. Try again later.")]
    RateLimited,

    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Failed to connect to the API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected API response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl<'a> ChatRequest<'a> {
    pub fn question(model: &'a str, text: &str) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT),
                ChatMessage::new("user", text),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// The content of the first choice
    pub fn into_answer(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("no choices returned".to_string()))
    }
}

/// Map a non-success status to the error shown to the user
pub fn error_for_status(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED => LlmError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
        other => LlmError::Http {
            status: other.as_u16(),
            body,
        },
    }
}

#[derive(Clone, Debug)]
pub struct ChatClient {
    config: LlmConfig,
    http: Client,
}

impl ChatClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn send_question(&self, text: &str) -> Result<String, LlmError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyQuestion);
        }

        debug!("Sending {} chars to {}", text.len(), self.config.api_url);
        let start = Instant::now();

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::question(&self.config.model, text))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(error_for_status(status, body));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        info!(
            "Answer received from {} in {}ms",
            self.config.model,
            start.elapsed().as_millis()
        );
        body.into_answer()
    }
}
