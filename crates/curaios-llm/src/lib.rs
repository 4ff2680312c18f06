//! curaios-llm — LLM backend abstraction and the LLM resolution adapter.
//!
//! `backend` talks to completion/embedding providers, `provider` picks one
//! from settings, and `resolution` turns completions into entity records and
//! expanded search queries without ever failing outward.

pub mod backend;
pub mod provider;
pub mod prompts;
pub mod parse;
pub mod resolution;
pub mod audit;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message, Role};
pub use provider::{build_backend, LlmSettings, ProviderKind};
pub use resolution::{LlmEntityRecord, LlmResolver, ResolutionLlm};
