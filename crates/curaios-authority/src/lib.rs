//! curaios-authority — external authority lookups for organisms and diseases.
//!
//! The resolver only sees the [`AuthorityLookup`] trait. [`NcbiAuthority`]
//! implements it over NCBI E-utilities: the Taxonomy database for organisms
//! and MeSH for diseases. Data types have no authority.

pub mod error;
pub mod eutils;
pub mod mesh;
pub mod ncbi;
pub mod scoring;
pub mod taxonomy;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use curaios_common::{AuthorityId, EntityKind};

pub use error::AuthorityError;
pub use ncbi::{NcbiAuthority, NcbiSettings};
pub use scoring::match_confidence;

/// A canonical record returned by an authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityRecord {
    pub canonical_name: String,
    pub authority_id: AuthorityId,
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// `None` lets the resolver apply its default authority confidence.
    pub confidence: Option<f64>,
}

#[async_trait]
pub trait AuthorityLookup: Send + Sync {
    /// Look `text` up in the authority for `kind`.
    ///
    /// `Ok(None)` is a definitive "not found". Callers decide whether an
    /// error is worth retrying with [`AuthorityError::is_transient`].
    async fn lookup(&self, text: &str, kind: EntityKind) -> Result<Option<AuthorityRecord>, AuthorityError>;
}
