//! Completion and embedding backends.
//!
//! Two chat wire formats cover every provider CurAIos talks to:
//!   OpenAI chat completions  OpenAI, OpenRouter, LM Studio, vLLM, Ollama
//!   Anthropic Messages       claude-*
//! Embeddings use `/v1/embeddings`, except Ollama's `/api/embeddings`.
//!
//! Nothing here retries. A failed call surfaces as [`LlmError`] and the
//! resolution adapter degrades.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const OPENAI_BASE_URL: &str = "https://api.openai.com";
const OPENAI_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("provider returned {status}: {message}")]
    ApiError { status: u16, message: String },
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmRequest {
    /// One user turn.
    pub fn prompt(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self { messages: vec![Message::user(prompt)], max_tokens, temperature }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError>;
    fn model_id(&self) -> &str;
    fn is_local(&self) -> bool;
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: ChatUsage,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletion {
    fn into_response(self, requested_model: &str) -> LlmResponse {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        LlmResponse {
            content,
            model: self.model.unwrap_or_else(|| requested_model.to_string()),
            prompt_tokens: self.usage.prompt_tokens,
            completion_tokens: self.usage.completion_tokens,
        }
    }
}

#[derive(Serialize)]
struct EmbeddingBody<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingList {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl EmbeddingList {
    /// Vectors in input order; items without an index keep their position.
    fn into_vectors(self) -> Vec<Vec<f32>> {
        let mut items: Vec<(usize, Vec<f32>)> = self
            .data
            .into_iter()
            .enumerate()
            .map(|(pos, item)| (item.index.unwrap_or(pos), item.embedding))
            .collect();
        items.sort_by_key(|(index, _)| *index);
        items.into_iter().map(|(_, v)| v).collect()
    }
}

#[derive(Serialize)]
struct AnthropicBody<'a> {
    model: &'a str,
    messages: Vec<&'a Message>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicReply {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<AnthropicBlock>,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// The Messages API takes system prompts as a top-level field.
fn anthropic_body<'a>(model: &'a str, req: &'a LlmRequest) -> AnthropicBody<'a> {
    let system: Vec<&str> = req
        .messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();
    AnthropicBody {
        model,
        messages: req.messages.iter().filter(|m| m.role != Role::System).collect(),
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        system: (!system.is_empty()).then(|| system.join("\n\n")),
    }
}

#[derive(Deserialize)]
struct OllamaEmbedding {
    embedding: Vec<f32>,
}

// ── Transport ─────────────────────────────────────────────────────────────────

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Send and decode. Non-2xx answers become [`LlmError::ApiError`].
async fn send_json<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, LlmError> {
    let resp = req.send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(LlmError::ApiError { status: status.as_u16(), message: error_message(&body) });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Provider error text: `error.message`, a bare `error` string, `message`,
/// or the start of the raw body.
fn error_message(body: &str) -> String {
    let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    json["error"]["message"]
        .as_str()
        .or_else(|| json["error"].as_str())
        .or_else(|| json["message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

// ── OpenAI-compatible endpoints ───────────────────────────────────────────────

/// Any endpoint speaking the OpenAI chat-completions format.
pub struct OpenAiCompatibleBackend {
    base_url: String,
    model: String,
    embedding_model: Option<String>,
    api_key: Option<String>,
    /// Sent with every request, e.g. OpenRouter's `X-Title`.
    headers: Vec<(String, String)>,
    client: reqwest::Client,
}

impl OpenAiCompatibleBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            embedding_model: None,
            api_key,
            headers: Vec::new(),
            client: http_client(),
        }
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = Some(model.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn embedding_model(&self) -> &str {
        self.embedding_model.as_deref().unwrap_or(&self.model)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.post(format!("{}{path}", self.base_url));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        for (name, value) in &self.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = ChatBody {
            model: &self.model,
            messages: &req.messages,
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };
        let completion: ChatCompletion = send_json(self.post("/v1/chat/completions").json(&body)).await?;
        Ok(completion.into_response(&self.model))
    }

    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let body = EmbeddingBody { model: self.embedding_model(), input: &texts };
        let list: EmbeddingList = send_json(self.post("/v1/embeddings").json(&body)).await?;
        Ok(list.into_vectors())
    }

    fn model_id(&self) -> &str { &self.model }
    fn is_local(&self) -> bool { false }
}

/// api.openai.com.
pub struct OpenAiBackend {
    inner: OpenAiCompatibleBackend,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: OpenAiCompatibleBackend::new(OPENAI_BASE_URL, model, Some(api_key.into()))
                .with_embedding_model(OPENAI_EMBEDDING_MODEL),
        }
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.inner = self.inner.with_embedding_model(model);
        self
    }

    pub fn embedding_model(&self) -> &str {
        self.inner.embedding_model()
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.inner.complete(req).await
    }

    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        self.inner.embed(texts).await
    }

    fn model_id(&self) -> &str { self.inner.model_id() }
    fn is_local(&self) -> bool { false }
}

/// Local Ollama: OpenAI-compatible chat, native embeddings.
pub struct OllamaBackend {
    chat: OpenAiCompatibleBackend,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self { chat: OpenAiCompatibleBackend::new(base_url, model, None) }
    }

    /// Defaults to the chat model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.chat = self.chat.with_embedding_model(model);
        self
    }

    pub fn embedding_model(&self) -> &str {
        self.chat.embedding_model()
    }
}

#[async_trait]
impl LlmBackend for OllamaBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.chat.complete(req).await
    }

    // one request per text
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in &texts {
            let body = serde_json::json!({ "model": self.embedding_model(), "prompt": text });
            let reply: OllamaEmbedding = send_json(self.chat.post("/api/embeddings").json(&body)).await?;
            vectors.push(reply.embedding);
        }
        Ok(vectors)
    }

    fn model_id(&self) -> &str { self.chat.model_id() }
    fn is_local(&self) -> bool { true }
}

// ── Anthropic ─────────────────────────────────────────────────────────────────

pub struct AnthropicBackend {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { model: model.into(), api_key: api_key.into(), client: http_client() }
    }
}

#[async_trait]
impl LlmBackend for AnthropicBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let request = self
            .client
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&anthropic_body(&self.model, &req));
        let reply: AnthropicReply = send_json(request).await?;

        let content = reply.content.into_iter().filter_map(|b| b.text).collect::<String>();
        Ok(LlmResponse {
            content,
            model: reply.model.unwrap_or_else(|| self.model.clone()),
            prompt_tokens: reply.usage.input_tokens,
            completion_tokens: reply.usage.output_tokens,
        })
    }

    async fn embed(&self, _texts: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        Err(LlmError::Unavailable("Anthropic has no embeddings endpoint".to_string()))
    }

    fn model_id(&self) -> &str { &self.model }
    fn is_local(&self) -> bool { false }
}
