//! Client for the chat-completion API behind the `/ai` routes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";

const SYSTEM_PROMPT: &str = "You are an AI assistant helping with task management.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured for the completion provider")]
    MissingApiKey,

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion provider answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion provider returned no choices")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Forwards prompts to the configured chat-completion endpoint.
///
/// The client is built once and shared; without an API key every call fails
/// with [`LlmError::MissingApiKey`] and nothing is sent.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
        })
    }

    /// Sends `prompt` as the user message and returns the first choice's text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }

    pub async fn suggest_tasks(&self, project_description: &str) -> Result<String, LlmError> {
        self.complete(&format!(
            "Generate a list of tasks for the following project: {}",
            project_description
        ))
        .await
    }

    pub async fn improve_task(&self, task_description: &str) -> Result<String, LlmError> {
        self.complete(&format!(
            "Rewrite and improve the clarity of this task description: {}",
            task_description
        ))
        .await
    }

    /// The answer is free text from the model, not a parsed priority.
    pub async fn assign_priority(&self, task_description: &str) -> Result<String, LlmError> {
        self.complete(&format!(
            "Analyze the following task and suggest its priority (Low, Medium, High): {}",
            task_description
        ))
        .await
    }
}
