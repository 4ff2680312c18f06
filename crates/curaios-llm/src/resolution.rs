//! LLM resolution adapter.
//!
//! Wraps an optional [`LlmBackend`] and turns completions into entity records
//! and expanded search queries. Nothing here fails outward: a missing
//! backend, a transport error or an unparseable answer all degrade to a
//! deterministic value the resolver can work with.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use curaios_common::{capitalize, confidence, EntityKind};

use crate::audit::LlmAuditEntry;
use crate::backend::{LlmBackend, LlmError, LlmRequest};
use crate::parse;
use crate::prompts;

/// What the model said about one mention.
///
/// An empty `canonical_name` means the answer carried nothing usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmEntityRecord {
    pub canonical_name: String,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl LlmEntityRecord {
    /// Capitalized echo of the input at the default LLM confidence.
    pub fn degraded(input: &str) -> Self {
        Self {
            canonical_name: capitalize(input),
            confidence: Some(confidence::LLM_DEFAULT),
            alternatives: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.canonical_name.trim().is_empty()
    }
}

#[async_trait]
pub trait ResolutionLlm: Send + Sync {
    /// Resolve a mention of `kind`. Never errors; see [`LlmEntityRecord`].
    async fn resolve(&self, text: &str, kind: EntityKind) -> LlmEntityRecord;

    /// Expand canonical names into a richer search query. `""` when every
    /// input is absent.
    async fn expand_query(
        &self,
        organism: Option<&str>,
        disease: Option<&str>,
        data_type: Option<&str>,
    ) -> String;
}

/// `organism:(X) AND disease:(Y) AND data_type:(Z)` over the present inputs.
pub fn basic_query(organism: Option<&str>, disease: Option<&str>, data_type: Option<&str>) -> String {
    [
        (EntityKind::Organism, organism),
        (EntityKind::Disease, disease),
        (EntityKind::DataType, data_type),
    ]
    .into_iter()
    .filter_map(|(kind, value)| value.map(|v| format!("{}:({})", kind.query_field(), v)))
    .collect::<Vec<_>>()
    .join(" AND ")
}

pub struct LlmResolver {
    backend: Option<Arc<dyn LlmBackend>>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmResolver {
    pub fn new(backend: Option<Arc<dyn LlmBackend>>, temperature: f32, max_tokens: u32) -> Self {
        Self { backend, temperature, max_tokens }
    }

    /// An adapter with no backend; every call takes the degraded path.
    pub fn offline() -> Self {
        Self::new(None, 0.1, 1000)
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    async fn complete(&self, backend: &dyn LlmBackend, purpose: &str, prompt: String) -> Result<String, LlmError> {
        let started = Instant::now();
        let response = backend
            .complete(LlmRequest::prompt(prompt, self.max_tokens, self.temperature))
            .await?;
        LlmAuditEntry::from_response(purpose, &response, started.elapsed().as_millis() as u64).record();
        Ok(response.content)
    }

    /// Cosine similarity of the two texts' embeddings, in [0, 1] for typical
    /// embedding models. Falls back to word overlap when embeddings are
    /// unavailable.
    pub async fn semantic_similarity(&self, a: &str, b: &str) -> f64 {
        if let Some(backend) = &self.backend {
            match backend.embed(vec![a.to_string(), b.to_string()]).await {
                Ok(vectors) if vectors.len() == 2 => return cosine(&vectors[0], &vectors[1]),
                Ok(vectors) => warn!(count = vectors.len(), "Unexpected embedding count; using word overlap"),
                Err(e) => warn!(error = %e, "Embedding failed; using word overlap"),
            }
        }
        word_overlap(a, b)
    }
}

#[async_trait]
impl ResolutionLlm for LlmResolver {
    async fn resolve(&self, text: &str, kind: EntityKind) -> LlmEntityRecord {
        let Some(backend) = &self.backend else {
            debug!(kind = %kind, "No LLM backend; degraded record");
            return LlmEntityRecord::degraded(text);
        };

        let purpose = format!("resolve:{kind}");
        let content = match self.complete(backend.as_ref(), &purpose, prompts::entity_prompt(text, kind)).await {
            Ok(content) => content,
            Err(e) => {
                error!(kind = %kind, error = %e, "LLM entity resolution failed");
                return LlmEntityRecord::degraded(text);
            }
        };

        let Some(obj) = parse::extract_json(&content) else {
            warn!(kind = %kind, "Could not extract JSON from LLM response");
            return LlmEntityRecord::default();
        };

        LlmEntityRecord {
            canonical_name: parse::string_field(&obj, "canonical_name").unwrap_or_default(),
            confidence: parse::f64_field(&obj, "confidence"),
            alternatives: parse::string_list(&obj, "alternatives"),
        }
    }

    async fn expand_query(
        &self,
        organism: Option<&str>,
        disease: Option<&str>,
        data_type: Option<&str>,
    ) -> String {
        if organism.is_none() && disease.is_none() && data_type.is_none() {
            warn!("No inputs provided for query expansion");
            return String::new();
        }

        let Some(backend) = &self.backend else {
            debug!("No LLM backend; basic query without expansion");
            return basic_query(organism, disease, data_type);
        };

        let prompt = prompts::expansion_prompt(organism, disease, data_type);
        let content = match self.complete(backend.as_ref(), "expand_query", prompt).await {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "LLM query expansion failed");
                return basic_query(organism, disease, data_type);
            }
        };

        match parse::extract_json(&content) {
            Some(obj) => match parse::string_field(&obj, "query") {
                Some(query) => {
                    info!(query = %query, "Expanded query");
                    query
                }
                None => basic_query(organism, disease, data_type),
            },
            None => {
                warn!("Expansion response was not JSON; looking for a query line");
                parse::query_line(&content).unwrap_or_else(|| basic_query(organism, disease, data_type))
            }
        }
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Shared lower-cased words over the larger word set.
fn word_overlap(a: &str, b: &str) -> f64 {
    let wa: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let wb: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();
    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }
    wa.intersection(&wb).count() as f64 / wa.len().max(wb.len()) as f64
}
