//! The entity resolver: validation, special cases, then the tier chain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use curaios_authority::AuthorityLookup;
use curaios_common::{capitalize, CuraiosError, EntityKind, ResolvedEntity, Result};
use curaios_llm::ResolutionLlm;

use crate::normalise::{clean_input, validate_generic, validate_input};
use crate::settings::ResolverSettings;
use crate::special_case;
use crate::tables::KnowledgeBase;
use crate::tiers::{default_chain, ResolutionTier, TierInput};

/// The external collaborators a resolver talks to.
#[derive(Clone)]
pub struct Adapters {
    pub authority: Arc<dyn AuthorityLookup>,
    pub llm: Arc<dyn ResolutionLlm>,
}

/// Raw inputs for one request; any subset may be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityInputs {
    pub organism: Option<String>,
    pub disease: Option<String>,
    pub data_type: Option<String>,
}

/// Resolved entities recombined by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntities {
    pub organism: Option<ResolvedEntity>,
    pub disease: Option<ResolvedEntity>,
    pub data_type: Option<ResolvedEntity>,
}

impl ResolvedEntities {
    pub fn get(&self, kind: EntityKind) -> Option<&ResolvedEntity> {
        match kind {
            EntityKind::Organism => self.organism.as_ref(),
            EntityKind::Disease  => self.disease.as_ref(),
            EntityKind::DataType => self.data_type.as_ref(),
        }
    }
}

pub struct Resolver {
    kb: Arc<KnowledgeBase>,
    tiers: Vec<Box<dyn ResolutionTier>>,
}

impl Resolver {
    /// Standard resolver over the given knowledge base and adapters.
    pub fn new(kb: Arc<KnowledgeBase>, adapters: Adapters, settings: &ResolverSettings) -> Self {
        let tiers = default_chain(kb.clone(), adapters.authority, adapters.llm, settings.fuzzy_threshold);
        Self { kb, tiers }
    }

    /// Resolver with a caller-assembled tier chain.
    pub fn with_tiers(kb: Arc<KnowledgeBase>, tiers: Vec<Box<dyn ResolutionTier>>) -> Self {
        Self { kb, tiers }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Validate and resolve raw user input.
    ///
    /// Only validation errors escape; past validation every call yields an
    /// entity.
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw: &str, kind: EntityKind) -> Result<ResolvedEntity> {
        let validated = validate_input(raw, kind)?;
        self.normalise_from(&validated, kind, raw).await
    }

    /// Resolve input that has already passed validation.
    pub async fn normalise(&self, validated: &str, kind: EntityKind) -> Result<ResolvedEntity> {
        self.normalise_from(validated, kind, validated).await
    }

    async fn normalise_from(&self, validated: &str, kind: EntityKind, original: &str) -> Result<ResolvedEntity> {
        info!(kind = %kind, input = validated, "Normalizing");
        if validated.trim().is_empty() {
            return Err(CuraiosError::Normalization(format!("Empty input for {kind}")));
        }

        let cleaned = clean_input(validated);
        if cleaned.is_empty() {
            return Err(CuraiosError::Normalization(format!("Nothing left of '{validated}' after cleaning")));
        }
        let folded = cleaned.to_lowercase();

        if let Some(entity) = special_case::expand(&self.kb, &folded, kind, original) {
            return Ok(entity);
        }

        let input = TierInput { cleaned: &cleaned, folded: &folded, original };
        match self.run_chain(&input, kind).await {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => {
                info!(kind = %kind, input = %cleaned, "No tier resolved input; falling back");
                Ok(ResolvedEntity::fallback(capitalize(&cleaned), original))
            }
            Err(e) => {
                error!(kind = %kind, input = %cleaned, error = %e, "Resolution failed; falling back");
                Ok(ResolvedEntity::fallback(capitalize(&cleaned), original))
            }
        }
    }

    async fn run_chain(&self, input: &TierInput<'_>, kind: EntityKind) -> anyhow::Result<Option<ResolvedEntity>> {
        for tier in self.tiers.iter().filter(|t| t.applies_to(kind)) {
            debug!(tier = tier.name(), kind = %kind, "Trying tier");
            if let Some(entity) = tier.resolve(input, kind).await? {
                info!(
                    tier = tier.name(),
                    kind = %kind,
                    canonical = entity.canonical_name(),
                    confidence = entity.confidence(),
                    "Resolved"
                );
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }

    /// Untyped input: generic validation and capitalization only.
    pub fn resolve_generic(&self, raw: &str) -> Result<ResolvedEntity> {
        let validated = validate_generic(raw)?;
        Ok(ResolvedEntity::generic(capitalize(&clean_input(&validated)), raw))
    }

    /// Resolve every present input concurrently.
    pub async fn resolve_request(&self, inputs: &EntityInputs) -> Result<ResolvedEntities> {
        let (organism, disease, data_type) = tokio::join!(
            self.resolve_optional(inputs.organism.as_deref(), EntityKind::Organism),
            self.resolve_optional(inputs.disease.as_deref(), EntityKind::Disease),
            self.resolve_optional(inputs.data_type.as_deref(), EntityKind::DataType),
        );
        Ok(ResolvedEntities {
            organism: organism?,
            disease: disease?,
            data_type: data_type?,
        })
    }

    async fn resolve_optional(&self, raw: Option<&str>, kind: EntityKind) -> Result<Option<ResolvedEntity>> {
        match raw {
            Some(raw) => self.resolve(raw, kind).await.map(Some),
            None => Ok(None),
        }
    }
}
