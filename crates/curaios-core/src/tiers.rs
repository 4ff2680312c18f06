//! The resolution tiers, tried in order by [`crate::Resolver`].
//!
//! Each tier answers `Ok(Some(_))` (terminal hit), `Ok(None)` (fall through)
//! or `Err(_)`, which makes the resolver abandon the chain and fall back.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use curaios_authority::AuthorityLookup;
use curaios_common::{confidence, EntityKind, ResolvedEntity, Source};
use curaios_llm::ResolutionLlm;

use crate::fuzzy;
use crate::tables::KnowledgeBase;

/// One mention as seen by the tiers.
#[derive(Debug, Clone, Copy)]
pub struct TierInput<'a> {
    /// Cleaned text, original casing.
    pub cleaned: &'a str,
    /// `cleaned`, lower-cased.
    pub folded: &'a str,
    /// Exactly what the caller passed in.
    pub original: &'a str,
}

#[async_trait]
pub trait ResolutionTier: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies_to(&self, _kind: EntityKind) -> bool {
        true
    }

    async fn resolve(&self, input: &TierInput<'_>, kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>>;
}

// ── Local table ─────────────────────────────────────────────────────────────

pub struct LocalTableTier {
    kb: Arc<KnowledgeBase>,
}

impl LocalTableTier {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

#[async_trait]
impl ResolutionTier for LocalTableTier {
    fn name(&self) -> &'static str { "local_mapping" }

    async fn resolve(&self, input: &TierInput<'_>, kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>> {
        Ok(self.kb.table(kind).get(input.folded).map(|t| {
            ResolvedEntity::from_mapping(
                t.canonical_name.clone(),
                t.authority_id.clone(),
                t.alternatives.clone(),
                confidence::LOCAL_EXACT,
                Source::LocalMapping,
                input.original,
            )
        }))
    }
}

// ── Authority ───────────────────────────────────────────────────────────────

pub struct AuthorityTier {
    authority: Arc<dyn AuthorityLookup>,
}

impl AuthorityTier {
    pub fn new(authority: Arc<dyn AuthorityLookup>) -> Self {
        Self { authority }
    }
}

#[async_trait]
impl ResolutionTier for AuthorityTier {
    fn name(&self) -> &'static str { "authority_lookup" }

    fn applies_to(&self, kind: EntityKind) -> bool {
        kind.has_authority()
    }

    async fn resolve(&self, input: &TierInput<'_>, kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>> {
        let record = match self.authority.lookup(input.cleaned, kind).await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(e) if e.is_transient() => {
                warn!(kind = %kind, input = input.cleaned, error = %e, "Authority lookup failed; continuing");
                return Ok(None);
            }
            Err(e) => return Err(anyhow!(e).context("authority lookup")),
        };

        if record.canonical_name.trim().is_empty() {
            debug!(kind = %kind, "Authority record without canonical name");
            return Ok(None);
        }

        Ok(Some(ResolvedEntity::from_authority(
            record.canonical_name,
            Some(record.authority_id),
            record.alternatives,
            record.confidence.unwrap_or(confidence::AUTHORITY_DEFAULT),
            input.original,
        )))
    }
}

// ── Fuzzy ───────────────────────────────────────────────────────────────────

pub struct FuzzyTier {
    kb: Arc<KnowledgeBase>,
    threshold: f64,
}

impl FuzzyTier {
    pub fn new(kb: Arc<KnowledgeBase>, threshold: f64) -> Self {
        Self { kb, threshold }
    }
}

#[async_trait]
impl ResolutionTier for FuzzyTier {
    fn name(&self) -> &'static str { "fuzzy_mapping" }

    async fn resolve(&self, input: &TierInput<'_>, kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>> {
        let table = self.kb.table(kind);
        let Some(hit) = fuzzy::best_match(input.folded, table.keys(), self.threshold) else {
            return Ok(None);
        };
        let template = table
            .get(hit.candidate)
            .ok_or_else(|| anyhow!("fuzzy candidate '{}' missing from table", hit.candidate))?;

        debug!(kind = %kind, candidate = hit.candidate, score = hit.score, "Fuzzy candidate accepted");
        Ok(Some(ResolvedEntity::from_mapping(
            template.canonical_name.clone(),
            template.authority_id.clone(),
            template.alternatives.clone(),
            hit.score,
            Source::FuzzyMapping,
            input.original,
        )))
    }
}

// ── Keyword (data type only) ────────────────────────────────────────────────

pub struct KeywordTier {
    kb: Arc<KnowledgeBase>,
}

impl KeywordTier {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

#[async_trait]
impl ResolutionTier for KeywordTier {
    fn name(&self) -> &'static str { "keyword_match" }

    fn applies_to(&self, kind: EntityKind) -> bool {
        kind == EntityKind::DataType
    }

    async fn resolve(&self, input: &TierInput<'_>, _kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>> {
        let text = input.folded;
        for (canonical, variants) in self.kb.data_type_variants.iter() {
            if variants.iter().any(|v| text.contains(v.as_str()) || v.contains(text)) {
                return Ok(Some(ResolvedEntity::keyword_match(canonical, input.original)));
            }
        }
        Ok(None)
    }
}

// ── LLM ─────────────────────────────────────────────────────────────────────

pub struct LlmTier {
    llm: Arc<dyn ResolutionLlm>,
}

impl LlmTier {
    pub fn new(llm: Arc<dyn ResolutionLlm>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResolutionTier for LlmTier {
    fn name(&self) -> &'static str { "llm" }

    async fn resolve(&self, input: &TierInput<'_>, kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>> {
        let record = self.llm.resolve(input.cleaned, kind).await;
        if record.is_empty() {
            info!(kind = %kind, "LLM produced no usable record");
            return Ok(None);
        }
        Ok(Some(ResolvedEntity::from_llm(
            record.canonical_name.trim(),
            record.confidence,
            record.alternatives,
            input.original,
        )))
    }
}

/// The standard chain: local → authority → fuzzy → keyword → LLM.
pub fn default_chain(
    kb: Arc<KnowledgeBase>,
    authority: Arc<dyn AuthorityLookup>,
    llm: Arc<dyn ResolutionLlm>,
    fuzzy_threshold: f64,
) -> Vec<Box<dyn ResolutionTier>> {
    vec![
        Box::new(LocalTableTier::new(kb.clone())),
        Box::new(AuthorityTier::new(authority)),
        Box::new(FuzzyTier::new(kb.clone(), fuzzy_threshold)),
        Box::new(KeywordTier::new(kb)),
        Box::new(LlmTier::new(llm)),
    ]
}
