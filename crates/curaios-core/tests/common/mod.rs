//! Deterministic adapter fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use curaios_authority::{AuthorityError, AuthorityLookup, AuthorityRecord};
use curaios_common::{AuthorityId, EntityKind};
use curaios_core::{Adapters, KnowledgeBase, Resolver, ResolverSettings};
use curaios_llm::{LlmEntityRecord, ResolutionLlm};

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// Looks like a 503.
    Transient,
    /// Looks like a 400.
    Permanent,
}

#[derive(Default)]
pub struct FakeAuthority {
    records: HashMap<String, AuthorityRecord>,
    failure: Option<Failure>,
    calls: Mutex<Vec<(String, EntityKind)>>,
}

impl FakeAuthority {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing(failure: Failure) -> Self {
        Self { failure: Some(failure), ..Default::default() }
    }

    /// Answer `text` (exact, as the adapter receives it) with `record`.
    pub fn with_record(mut self, text: &str, record: AuthorityRecord) -> Self {
        self.records.insert(text.to_string(), record);
        self
    }

    pub fn calls(&self) -> Vec<(String, EntityKind)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthorityLookup for FakeAuthority {
    async fn lookup(&self, text: &str, kind: EntityKind) -> Result<Option<AuthorityRecord>, AuthorityError> {
        self.calls.lock().unwrap().push((text.to_string(), kind));
        match self.failure {
            Some(Failure::Transient) => Err(AuthorityError::Api { status: 503, message: "unavailable".into() }),
            Some(Failure::Permanent) => Err(AuthorityError::Api { status: 400, message: "bad request".into() }),
            None => Ok(self.records.get(text).cloned()),
        }
    }
}

pub fn taxon(name: &str, id: u32, alternatives: &[&str], confidence: Option<f64>) -> AuthorityRecord {
    AuthorityRecord {
        canonical_name: name.to_string(),
        authority_id: AuthorityId::Taxonomy(id),
        alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        confidence,
    }
}

/// Unknown inputs get the offline echo unless `silent` is set, in which
/// case they get an empty record.
#[derive(Default)]
pub struct FakeLlm {
    records: HashMap<String, LlmEntityRecord>,
    expansion: Option<String>,
    silent: bool,
    resolve_calls: Mutex<Vec<(String, EntityKind)>>,
    expand_calls: Mutex<Vec<(Option<String>, Option<String>, Option<String>)>>,
}

impl FakeLlm {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn silent() -> Self {
        Self { silent: true, ..Default::default() }
    }

    pub fn with_record(mut self, text: &str, name: &str, confidence: Option<f64>) -> Self {
        self.records.insert(
            text.to_string(),
            LlmEntityRecord { canonical_name: name.to_string(), confidence, alternatives: vec![] },
        );
        self
    }

    pub fn with_expansion(mut self, query: &str) -> Self {
        self.expansion = Some(query.to_string());
        self
    }

    pub fn resolve_calls(&self) -> Vec<(String, EntityKind)> {
        self.resolve_calls.lock().unwrap().clone()
    }

    pub fn expand_calls(&self) -> Vec<(Option<String>, Option<String>, Option<String>)> {
        self.expand_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResolutionLlm for FakeLlm {
    async fn resolve(&self, text: &str, kind: EntityKind) -> LlmEntityRecord {
        self.resolve_calls.lock().unwrap().push((text.to_string(), kind));
        match self.records.get(text) {
            Some(record) => record.clone(),
            None if self.silent => LlmEntityRecord::default(),
            None => LlmEntityRecord::degraded(text),
        }
    }

    async fn expand_query(&self, organism: Option<&str>, disease: Option<&str>, data_type: Option<&str>) -> String {
        self.expand_calls.lock().unwrap().push((
            organism.map(String::from),
            disease.map(String::from),
            data_type.map(String::from),
        ));
        self.expansion.clone().unwrap_or_default()
    }
}

pub fn resolver(authority: Arc<FakeAuthority>, llm: Arc<FakeLlm>) -> Resolver {
    Resolver::new(
        KnowledgeBase::builtin(),
        Adapters { authority, llm },
        &ResolverSettings::default(),
    )
}
