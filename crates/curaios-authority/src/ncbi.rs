//! `AuthorityLookup` over NCBI Taxonomy and MeSH.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use curaios_common::EntityKind;

use crate::error::AuthorityError;
use crate::eutils::EutilsClient;
use crate::scoring::match_confidence;
use crate::{mesh, taxonomy, AuthorityLookup, AuthorityRecord};

/// `[ncbi]` section of the application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NcbiSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tool()         -> String { "CurAIos".to_string() }
fn default_timeout_secs() -> u64    { 30 }

impl Default for NcbiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            email: String::new(),
            tool: default_tool(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

pub struct NcbiAuthority {
    client: EutilsClient,
}

impl NcbiAuthority {
    pub fn new(settings: &NcbiSettings) -> Result<Self, AuthorityError> {
        let client = EutilsClient::new(
            settings.tool.clone(),
            Some(settings.email.clone()),
            Some(settings.api_key.clone()),
            Duration::from_secs(settings.timeout_secs),
        )?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: EutilsClient) -> Self {
        Self { client }
    }

    async fn lookup_taxon(&self, text: &str) -> Result<Option<AuthorityRecord>, AuthorityError> {
        let ids = self.client.esearch(taxonomy::DB, text, 1).await?;
        let Some(uid) = ids.first() else {
            debug!(text, "No taxonomy hit");
            return Ok(None);
        };

        let summary = self.client.esummary(taxonomy::DB, uid).await?;
        let record = taxonomy::extract_organism(&summary, uid)?;
        Ok(Some(scored(text, record)))
    }

    async fn lookup_descriptor(&self, text: &str) -> Result<Option<AuthorityRecord>, AuthorityError> {
        let mut ids = self.client.esearch(mesh::DB, text, 1).await?;
        if ids.is_empty() {
            debug!(text, "No MeSH hit; retrying with MeSH Terms qualifier");
            ids = self.client.esearch(mesh::DB, &mesh::qualified_term(text), 1).await?;
        }
        let Some(uid) = ids.first() else {
            debug!(text, "No MeSH hit");
            return Ok(None);
        };

        let summary = self.client.esummary(mesh::DB, uid).await?;
        let record = mesh::extract_descriptor(&summary, uid)?;
        Ok(Some(scored(text, record)))
    }
}

fn scored(text: &str, mut record: AuthorityRecord) -> AuthorityRecord {
    record.confidence = Some(match_confidence(text, &record.canonical_name, &record.alternatives));
    record
}

#[async_trait]
impl AuthorityLookup for NcbiAuthority {
    async fn lookup(&self, text: &str, kind: EntityKind) -> Result<Option<AuthorityRecord>, AuthorityError> {
        let record = match kind {
            EntityKind::Organism => self.lookup_taxon(text).await?,
            EntityKind::Disease  => self.lookup_descriptor(text).await?,
            EntityKind::DataType => return Err(AuthorityError::Unsupported(kind)),
        };
        if let Some(rec) = &record {
            info!(
                kind = %kind,
                canonical = %rec.canonical_name,
                id = %rec.authority_id,
                "Authority match"
            );
        }
        Ok(record)
    }
}
