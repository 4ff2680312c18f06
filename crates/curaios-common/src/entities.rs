//! Entity kinds, provenance tags, and the `ResolvedEntity` value produced by
//! every resolution path.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::confidence;

// ---------------------------------------------------------------------------
// Entity kind
// ---------------------------------------------------------------------------

/// The closed set of entity kinds the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organism,
    Disease,
    DataType,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Organism, EntityKind::Disease, EntityKind::DataType];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Organism => "organism",
            EntityKind::Disease  => "disease",
            EntityKind::DataType => "data_type",
        }
    }

    /// Field name used in composed search queries.
    pub fn query_field(&self) -> &'static str {
        self.as_str()
    }

    /// Whether an external authority (taxonomy / vocabulary) exists for this kind.
    pub fn has_authority(&self) -> bool {
        !matches!(self, EntityKind::DataType)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "organism"  => Some(EntityKind::Organism),
            "disease"   => Some(EntityKind::Disease),
            "data_type" | "datatype" => Some(EntityKind::DataType),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Which resolution path produced an entity. Exactly one per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    LocalMapping,
    AuthorityLookup,
    FuzzyMapping,
    KeywordMatch,
    Llm,
    SpecialCase,
    Generic,
    UserOverride,
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::LocalMapping    => "local_mapping",
            Source::AuthorityLookup => "authority_lookup",
            Source::FuzzyMapping    => "fuzzy_mapping",
            Source::KeywordMatch    => "keyword_match",
            Source::Llm             => "llm",
            Source::SpecialCase     => "special_case",
            Source::Generic         => "generic",
            Source::UserOverride    => "user_override",
            Source::Fallback        => "fallback",
        }
    }

    /// Sources that may carry an authority identifier.
    /// Fuzzy hits propagate the identifier of the local template they matched.
    pub fn carries_authority_id(&self) -> bool {
        matches!(
            self,
            Source::LocalMapping | Source::AuthorityLookup | Source::FuzzyMapping
        )
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Authority identifiers
// ---------------------------------------------------------------------------

/// External identifier attached by a local table or an authority lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "authority", content = "id", rename_all = "snake_case")]
pub enum AuthorityId {
    /// NCBI Taxonomy numeric identifier, e.g. 9606.
    Taxonomy(u32),
    /// MeSH descriptor UI, e.g. "D000544".
    Mesh(String),
}

impl fmt::Display for AuthorityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorityId::Taxonomy(id) => write!(f, "NCBITaxon:{id}"),
            AuthorityId::Mesh(ui)     => write!(f, "MESH:{ui}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedEntity
// ---------------------------------------------------------------------------

/// The result of resolving one free-text mention.
///
/// Values are built through the provenance-specific constructors below and
/// are read-only afterwards; the constructors enforce which optional fields
/// are meaningful for each `Source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    canonical_name: String,
    confidence: f64,
    original_input: String,
    source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    authority_id: Option<AuthorityId>,
    #[serde(default)]
    alternatives: Vec<String>,
    #[serde(default)]
    is_special_case: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    expanded_terms: Vec<String>,
}

impl ResolvedEntity {
    fn base(
        canonical_name: impl Into<String>,
        confidence: f64,
        original_input: impl Into<String>,
        source: Source,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            confidence: confidence::clamp(confidence),
            original_input: original_input.into(),
            source,
            authority_id: None,
            alternatives: Vec::new(),
            is_special_case: false,
            expanded_terms: Vec::new(),
        }
    }

    /// A record produced from a local mapping template (exact or fuzzy hit).
    pub fn from_mapping(
        canonical_name: impl Into<String>,
        authority_id: Option<AuthorityId>,
        alternatives: Vec<String>,
        confidence: f64,
        source: Source,
        original_input: impl Into<String>,
    ) -> Self {
        debug_assert!(matches!(source, Source::LocalMapping | Source::FuzzyMapping));
        let mut entity = Self::base(canonical_name, confidence, original_input, source);
        entity.authority_id = authority_id;
        entity.alternatives = alternatives;
        entity
    }

    /// A record returned by an external authority. Confidence is capped
    /// below the exact local score.
    pub fn from_authority(
        canonical_name: impl Into<String>,
        authority_id: Option<AuthorityId>,
        alternatives: Vec<String>,
        confidence: f64,
        original_input: impl Into<String>,
    ) -> Self {
        let confidence = confidence::cap_non_local(confidence);
        let mut entity = Self::base(canonical_name, confidence, original_input, Source::AuthorityLookup);
        entity.authority_id = authority_id;
        entity.alternatives = alternatives;
        entity
    }

    /// A data-type keyword/substring hit.
    pub fn keyword_match(canonical_name: impl Into<String>, original_input: impl Into<String>) -> Self {
        Self::base(canonical_name, confidence::KEYWORD_MATCH, original_input, Source::KeywordMatch)
    }

    /// A record produced by the LLM fallback tier. Confidence is capped
    /// below the exact local score.
    pub fn from_llm(
        canonical_name: impl Into<String>,
        confidence: Option<f64>,
        alternatives: Vec<String>,
        original_input: impl Into<String>,
    ) -> Self {
        let mut entity = Self::base(
            canonical_name,
            confidence::cap_non_local(confidence.unwrap_or(confidence::LLM_DEFAULT)),
            original_input,
            Source::Llm,
        );
        entity.alternatives = alternatives;
        entity
    }

    /// An umbrella term expanded into a pre-declared list of specific terms.
    pub fn special_case(
        canonical_name: impl Into<String>,
        expanded_terms: Vec<String>,
        original_input: impl Into<String>,
    ) -> Self {
        let mut entity = Self::base(canonical_name, confidence::SPECIAL_CASE, original_input, Source::SpecialCase);
        entity.is_special_case = true;
        entity.expanded_terms = expanded_terms;
        entity
    }

    /// Untyped input that only went through generic validation.
    pub fn generic(canonical_name: impl Into<String>, original_input: impl Into<String>) -> Self {
        Self::base(canonical_name, confidence::GENERIC, original_input, Source::Generic)
    }

    /// A value the user insisted on keeping after validation rejected it.
    pub fn user_override(canonical_name: impl Into<String>, original_input: impl Into<String>) -> Self {
        Self::base(canonical_name, confidence::FALLBACK, original_input, Source::UserOverride)
    }

    /// Final degradation when no tier produced a usable result.
    pub fn fallback(canonical_name: impl Into<String>, original_input: impl Into<String>) -> Self {
        Self::base(canonical_name, confidence::FALLBACK, original_input, Source::Fallback)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn canonical_name(&self) -> &str { &self.canonical_name }
    pub fn confidence(&self) -> f64 { self.confidence }
    pub fn original_input(&self) -> &str { &self.original_input }
    pub fn source(&self) -> Source { self.source }
    pub fn authority_id(&self) -> Option<&AuthorityId> { self.authority_id.as_ref() }
    pub fn alternatives(&self) -> &[String] { &self.alternatives }
    pub fn is_special_case(&self) -> bool { self.is_special_case }
    pub fn expanded_terms(&self) -> &[String] { &self.expanded_terms }
}
