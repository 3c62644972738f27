//! Groq chat-completion client (OpenAI-compatible wire format).

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use webrag_core::config::QueryConfig;

/// Environment variable holding the bearer credential.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

const SYSTEM_MESSAGE: &str = "You answer based ONLY on provided context.";
const TEMPERATURE: f32 = 0.2;

/// What the query stage got back from the hosted model.
///
/// Callers branch on the variant instead of parsing log text; on anything
/// but [`AnswerOutcome::Answer`] the assembled prompt is the fallback
/// artifact to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Answer(String),
    MissingCredential,
    RemoteFailure(String),
}

/// Reads the credential from the environment and requests a completion.
pub fn request_answer(cfg: &QueryConfig, prompt: &str) -> AnswerOutcome {
    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => return AnswerOutcome::MissingCredential,
    };
    let client = match GroqClient::new(api_key, cfg.model.clone(), cfg.api_url.clone()) {
        Ok(client) => client,
        Err(err) => return AnswerOutcome::RemoteFailure(format!("{err:#}")),
    };
    match client.complete(prompt) {
        Ok(answer) => AnswerOutcome::Answer(answer),
        Err(err) => AnswerOutcome::RemoteFailure(format!("{err:#}")),
    }
}

pub struct GroqClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl GroqClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("failed to build chat-completion HTTP client")?;
        Ok(Self {
            api_key,
            model,
            endpoint,
            client,
        })
    }

    /// Sends the prompt plus the fixed system message; returns the first
    /// choice's content.
    pub fn complete(&self, prompt: &str) -> Result<String> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", self.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).context("invalid API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };
        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "requesting completion");
        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .with_context(|| format!("failed to call {}", self.endpoint))?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("chat completion returned {}: {}", status, text);
        }
        let parsed: ChatResponse = response.json().context("failed to parse completion")?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(answer)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}
