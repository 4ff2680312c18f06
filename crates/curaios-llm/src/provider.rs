//! Backend selection from LLM settings.
//!
//! Provider rules:
//!   api key starting with `sk-or-`  → OpenRouter (OpenAI-compatible gateway)
//!   model prefixed `openai/`        → OpenAI
//!   model prefixed `anthropic/`     → Anthropic
//!   model prefixed `ollama/`        → local Ollama, no key required
//!   any other model                 → OpenRouter
//! Without an API key (and not Ollama) no backend is built and the
//! resolution adapter runs in its degraded mode.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backend::{
    AnthropicBackend, LlmBackend, OllamaBackend, OpenAiBackend, OpenAiCompatibleBackend,
};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api";
const OLLAMA_BASE_URL: &str = "http://localhost:11434";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    OpenRouter,
    Ollama,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi     => "openai",
            ProviderKind::Anthropic  => "anthropic",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Ollama     => "ollama",
        }
    }

    /// Pick the provider for a model id and API key.
    pub fn detect(model: &str, api_key: &str) -> Self {
        if api_key.starts_with("sk-or-") {
            return ProviderKind::OpenRouter;
        }
        match model.split_once('/').map(|(prefix, _)| prefix) {
            Some("openai")    => ProviderKind::OpenAi,
            Some("anthropic") => ProviderKind::Anthropic,
            Some("ollama")    => ProviderKind::Ollama,
            _                 => ProviderKind::OpenRouter,
        }
    }

    /// Model name as the provider expects it. OpenRouter keeps the vendor prefix.
    pub fn model_name<'a>(&self, model: &'a str) -> &'a str {
        match self {
            ProviderKind::OpenRouter => model,
            _ => model.split_once('/').map(|(_, name)| name).unwrap_or(model),
        }
    }
}

/// LLM section of the application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Overrides the provider's default endpoint (OpenRouter / Ollama).
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model()           -> String { "deepseek/deepseek-chat".to_string() }
fn default_embedding_model() -> String { "openai/text-embedding-ada-002".to_string() }
fn default_temperature()     -> f32    { 0.1 }
fn default_max_tokens()      -> u32    { 1000 }

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
        }
    }
}

impl LlmSettings {
    pub fn provider(&self) -> ProviderKind {
        ProviderKind::detect(&self.model, &self.api_key)
    }
}

/// Embedding model for an Ollama backend: only `ollama/`-prefixed names
/// (or unprefixed ones) are served locally.
fn ollama_embedding_model(embedding_model: &str) -> Option<&str> {
    match embedding_model.split_once('/') {
        Some(("ollama", name)) => Some(name),
        Some(_) => None,
        None if embedding_model.is_empty() => None,
        None => Some(embedding_model),
    }
}

/// Build the completion/embedding backend described by `settings`, if any.
pub fn build_backend(settings: &LlmSettings) -> Option<Arc<dyn LlmBackend>> {
    let provider = settings.provider();
    let model = provider.model_name(&settings.model).to_string();
    let embedding_model = settings.embedding_model
        .split_once('/')
        .map(|(_, name)| name)
        .unwrap_or(&settings.embedding_model)
        .to_string();

    if settings.api_key.is_empty() && provider != ProviderKind::Ollama {
        tracing::warn!(
            model = %settings.model,
            "LLM API key not set; semantic fallback and query expansion will run degraded"
        );
        return None;
    }

    let backend: Arc<dyn LlmBackend> = match provider {
        ProviderKind::OpenAi => Arc::new(
            OpenAiBackend::new(settings.api_key.clone(), model)
                .with_embedding_model(embedding_model),
        ),
        ProviderKind::Anthropic => Arc::new(
            AnthropicBackend::new(settings.api_key.clone(), model),
        ),
        ProviderKind::OpenRouter => Arc::new(
            OpenAiCompatibleBackend::new(
                settings.base_url.clone().unwrap_or_else(|| OPENROUTER_BASE_URL.to_string()),
                model,
                Some(settings.api_key.clone()),
            )
            .with_embedding_model(settings.embedding_model.clone())
            .with_header("X-Title", "CurAIos"),
        ),
        ProviderKind::Ollama => {
            let backend = OllamaBackend::new(
                settings.base_url.clone().unwrap_or_else(|| OLLAMA_BASE_URL.to_string()),
                model,
            );
            match ollama_embedding_model(&settings.embedding_model) {
                Some(name) => Arc::new(backend.with_embedding_model(name)),
                None => {
                    tracing::debug!(
                        embedding_model = %settings.embedding_model,
                        "Embedding model is not an ollama/ model; embedding with the chat model"
                    );
                    Arc::new(backend)
                }
            }
        }
    };

    tracing::info!(
        provider = provider.as_str(),
        model = backend.model_id(),
        is_local = backend.is_local(),
        "LLM backend ready"
    );
    Some(backend)
}
