//! Language-model access over an OpenAI-compatible chat API.
//!
//! # Architecture
//!
//! - [`ChatModel`]: the seam the stages talk to, "instructions + input in,
//!   text out"
//! - [`OpenAiChat`]: the real client, posting to `<base_url>/chat/completions`
//!
//! There is no retry layer. A failed call is returned to the caller as is and
//! ends the run.

use crate::error::{Error, Result};
use crate::utils::truncate_for_log;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

const SERVICE: &str = "chat model";

/// Trait for async LLM interaction.
///
/// Every call sends exactly two role-tagged blocks: a system block with the
/// instructions, then a user block with the content. The response is opaque
/// prose.
pub trait ChatModel {
    async fn complete(&self, instructions: &str, input: &str) -> Result<String>;
}

impl<T: ChatModel> ChatModel for &T {
    async fn complete(&self, instructions: &str, input: &str) -> Result<String> {
        (**self).complete(instructions, input).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for any endpoint speaking the OpenAI `chat/completions` protocol
/// (OpenRouter by default).
///
/// Credentials are optional at construction; a missing key or base URL is
/// reported by [`ChatModel::complete`] when the first call is made.
pub struct OpenAiChat {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: Option<String>,
    model: String,
}

impl fmt::Debug for OpenAiChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiChat")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiChat {
    pub fn new(api_key: Option<String>, base_url: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ChatModel for OpenAiChat {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn complete(&self, instructions: &str, input: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(Error::MissingCredential("OPENROUTER_API_KEY"))?;
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(Error::MissingCredential("OPENROUTER_BASE_URL"))?;
        let endpoint = chat_completions_url(base_url)?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: instructions,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
        };

        let t0 = Instant::now();
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = t0.elapsed().as_millis();

        if !status.is_success() {
            warn!(%status, elapsed_ms, body = %truncate_for_log(&body, 300), "Model call failed");
            return Err(Error::Status {
                service: SERVICE,
                status,
                body,
            });
        }

        let content = parse_completion(&body)?;
        info!(elapsed_ms, bytes = content.len(), "Model call succeeded");
        debug!(preview = %truncate_for_log(&content, 300), "Model output");
        Ok(content)
    }
}

/// Resolve `chat/completions` against a base URL, with or without a trailing
/// slash.
pub fn chat_completions_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("chat/completions")?)
}

/// Pull the first choice's message text out of a completion body.
fn parse_completion(body: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
            service: SERVICE,
            reason: e.to_string(),
        })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::MalformedResponse {
            service: SERVICE,
            reason: "no message content in first choice".to_string(),
        })
}
