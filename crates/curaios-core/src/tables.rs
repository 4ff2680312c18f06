//! Static knowledge: local mapping tables, special cases and data-type
//! variant phrasings.
//!
//! Everything here is immutable after construction. The built-in knowledge
//! base is assembled once per process and shared as `Arc<KnowledgeBase>`.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use curaios_common::{AuthorityId, EntityKind};

use crate::builtin;

/// What a local synonym resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTemplate {
    pub canonical_name: String,
    pub authority_id: Option<AuthorityId>,
    pub alternatives: Vec<String>,
}

impl MappingTemplate {
    pub fn new(canonical_name: impl Into<String>, authority_id: Option<AuthorityId>, alternatives: &[&str]) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            authority_id,
            alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Lower-cased synonym → template, iterated in insertion order.
#[derive(Debug, Default, Clone)]
pub struct LocalMappingTable {
    entries: Vec<(String, MappingTemplate)>,
    index: HashMap<String, usize>,
}

impl LocalMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the lower-cased key. The first insertion of a key wins.
    pub fn insert(&mut self, key: &str, template: MappingTemplate) {
        let key = key.to_lowercase();
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, template));
    }

    /// Register one template under several synonyms.
    pub fn insert_all(&mut self, keys: &[&str], template: MappingTemplate) {
        for key in keys {
            self.insert(key, template.clone());
        }
    }

    /// Exact lookup. `key` must already be case-folded.
    pub fn get(&self, key: &str) -> Option<&MappingTemplate> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecialCase {
    pub kind: EntityKind,
    pub expansion: Vec<String>,
}

/// Umbrella terms that expand into a fixed list instead of resolving.
#[derive(Debug, Default, Clone)]
pub struct SpecialCaseTable {
    terms: HashMap<String, SpecialCase>,
}

impl SpecialCaseTable {
    pub fn insert(&mut self, term: &str, kind: EntityKind, expansion: &[&str]) {
        self.terms.insert(
            term.to_lowercase(),
            SpecialCase { kind, expansion: expansion.iter().map(|s| s.to_string()).collect() },
        );
    }

    pub fn get(&self, folded_term: &str) -> Option<&SpecialCase> {
        self.terms.get(folded_term)
    }
}

/// Canonical data type → variant phrasings, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct DataTypeVariants {
    entries: Vec<(String, Vec<String>)>,
}

impl DataTypeVariants {
    pub fn push(&mut self, canonical: &str, variants: &[&str]) {
        self.entries.push((
            canonical.to_string(),
            variants.iter().map(|v| v.to_lowercase()).collect(),
        ));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v.as_slice()))
    }
}

#[derive(Debug, Default, Clone)]
pub struct KnowledgeBase {
    pub organisms: LocalMappingTable,
    pub diseases: LocalMappingTable,
    pub data_types: LocalMappingTable,
    pub special_cases: SpecialCaseTable,
    pub data_type_variants: DataTypeVariants,
}

impl KnowledgeBase {
    /// The process-wide built-in tables.
    pub fn builtin() -> Arc<KnowledgeBase> {
        static KB: OnceLock<Arc<KnowledgeBase>> = OnceLock::new();
        KB.get_or_init(|| {
            let kb = builtin::knowledge_base();
            tracing::debug!(
                organisms = kb.organisms.len(),
                diseases = kb.diseases.len(),
                data_types = kb.data_types.len(),
                "Built-in knowledge base loaded"
            );
            Arc::new(kb)
        })
        .clone()
    }

    pub fn table(&self, kind: EntityKind) -> &LocalMappingTable {
        match kind {
            EntityKind::Organism => &self.organisms,
            EntityKind::Disease  => &self.diseases,
            EntityKind::DataType => &self.data_types,
        }
    }
}
