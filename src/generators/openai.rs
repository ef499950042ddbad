use crate::config::{API_KEY_ENV, GeneratorConfig};
use crate::error::{GenerateError, Result};
use crate::generators::Generator;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// System instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str = "指定以外の文字を出さず、HTML本文のみを返します。本文が2000〜3000字になるように調整し、豆知識×3と学術メモを必ず含めてください。";

/// Sampling temperature
pub const TEMPERATURE: f32 = 0.5;

/// Default completion token budget
pub const DEFAULT_MAX_TOKENS: u32 = 3600;

const DEFAULT_STATUS_MESSAGE: &str = "chat completion request failed";

/// Chat-completions client
///
/// One request per call; no retries and no client-side timeout.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client for the configured endpoint and model
    pub fn new(api_key: String, config: &GeneratorConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            api_key,
            endpoint: chat_completions_url(&config.api_base_url),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            client,
        })
    }

    /// Create a client reading the API key from `OPENAI_API_KEY`
    pub fn from_env(config: &GeneratorConfig) -> Result<Self> {
        Self::from_env_lookup(config, |key| std::env::var(key).ok())
    }

    /// Create a client reading the API key through an arbitrary lookup
    pub fn from_env_lookup<F>(config: &GeneratorConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerateError::MissingEnv(API_KEY_ENV.to_string()))?;

        Self::new(api_key, config)
    }

    /// Sends one chat completion and returns the trimmed text of the first choice
    pub async fn call_openai(&self, prompt: &str, model: &str, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        ::log::info!(
            "Requesting completion from {} (model={}, max_tokens={})",
            self.endpoint,
            model,
            max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body_text).unwrap_or_else(|| {
                if !body_text.trim().is_empty() {
                    body_text.clone()
                } else {
                    DEFAULT_STATUS_MESSAGE.to_string()
                }
            });
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body_text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerateError::EmptyCompletion)?;

        let text = content.trim().to_string();
        ::log::info!("Received completion of {} characters", text.chars().count());
        Ok(text)
    }
}

impl Generator for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call_openai(prompt, &self.model, self.max_tokens).await
    }
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error envelope of the chat-completions API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Reads `error.message` from an API error body, tagged with `error.code` when present
fn api_error_message(body: &str) -> Option<String> {
    let ApiError { message, code } = serde_json::from_str::<ErrorResponse>(body).ok()?.error;
    match code {
        Some(code) if !code.is_empty() => Some(format!("{} ({})", message, code)),
        _ => Some(message),
    }
}
