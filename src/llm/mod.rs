mod api_error;
mod error;
pub mod parse;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::model::{CopyVariant, GenerationInput};
use crate::prompt;

pub use error::GenerationError;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// Chat-completion client for an OpenAI-compatible endpoint. Each call is a
/// single request; retries live in the request engine.
#[derive(Debug, Clone)]
pub struct LlmClient {
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: &ClientConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn call(&self, input: &GenerationInput) -> Result<Vec<CopyVariant>, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = request_body(&self.model, input);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let payload = response.text().await?;
        debug!(status = status.as_u16(), bytes = payload.len(), "completion response");
        if !status.is_success() {
            return Err(GenerationError::from_status(status.as_u16(), &payload));
        }

        let content = extract_content(&payload)?;
        Ok(parse::normalize(&content, input))
    }
}

fn request_body(model: &str, input: &GenerationInput) -> Value {
    json!({
        "model": model,
        "messages": [
            {
                "role": "system",
                "content": prompt::SYSTEM_PROMPT
            },
            {
                "role": "user",
                "content": prompt::build(input)
            }
        ],
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS
    })
}

fn extract_content(payload: &str) -> Result<String, GenerationError> {
    let parsed: ChatResponse =
        serde_json::from_str(payload).map_err(|_| GenerationError::EmptyResponse)?;
    if let Some(usage) = &parsed.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "token usage"
        );
    }
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}
