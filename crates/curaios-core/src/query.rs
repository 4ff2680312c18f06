//! Search query composition from resolved entities.
//!
//! ```text
//! organism:(Homo sapiens) AND disease:(Asthma) samples:>=10 AND publication_date:[...]
//! └──────────── entity clauses, AND-joined ───┘ └──────── filter clauses, AND-joined ─┘
//! ```

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use curaios_common::{EntityKind, ResolvedEntity};
use curaios_llm::ResolutionLlm;

use crate::resolver::ResolvedEntities;

#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub organism: Option<ResolvedEntity>,
    pub disease: Option<ResolvedEntity>,
    pub data_type: Option<ResolvedEntity>,
    /// Zero is treated as absent.
    pub min_samples: Option<u32>,
    pub date_range: Option<String>,
    /// Rendered `key:value`, in this order.
    pub extra_filters: Vec<(String, String)>,
}

impl QueryRequest {
    pub fn from_entities(entities: ResolvedEntities) -> Self {
        Self {
            organism: entities.organism,
            disease: entities.disease,
            data_type: entities.data_type,
            ..Default::default()
        }
    }

    fn entities(&self) -> [(EntityKind, Option<&ResolvedEntity>); 3] {
        [
            (EntityKind::Organism, self.organism.as_ref()),
            (EntityKind::Disease, self.disease.as_ref()),
            (EntityKind::DataType, self.data_type.as_ref()),
        ]
    }

    pub fn has_entities(&self) -> bool {
        self.entities().iter().any(|(_, e)| e.is_some())
    }
}

/// Parameters handed to a repository search client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameters {
    pub query: String,
    pub format: String,
    pub limit: u32,
    pub sort: String,
}

pub fn api_parameters(query: &str) -> ApiParameters {
    ApiParameters {
        query: query.to_string(),
        format: "json".to_string(),
        limit: 100,
        sort: "relevance".to_string(),
    }
}

fn year_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{4})$").unwrap())
}

fn date_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2}):(\d{4}-\d{2}-\d{2})$").unwrap())
}

/// Render a date-range expression as a `publication_date` clause.
///
/// `YYYY-YYYY` and `YYYY-MM-DD:YYYY-MM-DD` become ranges; anything else is
/// passed through verbatim.
pub fn parse_date_range(range: &str) -> String {
    if let Some(c) = year_range_re().captures(range) {
        return format!("publication_date:[{}-01-01 TO {}-12-31]", &c[1], &c[2]);
    }
    if let Some(c) = date_range_re().captures(range) {
        return format!("publication_date:[{} TO {}]", &c[1], &c[2]);
    }
    warn!(date_range = range, "Unrecognized date range format");
    format!("publication_date:{range}")
}

/// The value used inside `field:(…)`: an OR-group for special cases,
/// otherwise the canonical name.
fn clause_value(entity: &ResolvedEntity) -> String {
    if entity.is_special_case() && !entity.expanded_terms().is_empty() {
        entity
            .expanded_terms()
            .iter()
            .map(|t| format!("({t})"))
            .collect::<Vec<_>>()
            .join(" OR ")
    } else {
        entity.canonical_name().to_string()
    }
}

/// Deterministic composition, without LLM expansion.
pub fn build_base_query(req: &QueryRequest) -> String {
    let entity_clauses: Vec<String> = req
        .entities()
        .into_iter()
        .filter_map(|(kind, e)| e.map(|e| format!("{}:({})", kind.query_field(), clause_value(e))))
        .collect();

    let mut filter_clauses: Vec<String> = Vec::new();
    if let Some(n) = req.min_samples.filter(|n| *n > 0) {
        filter_clauses.push(format!("samples:>={n}"));
    }
    if let Some(range) = &req.date_range {
        filter_clauses.push(parse_date_range(range));
    }
    for (key, value) in &req.extra_filters {
        filter_clauses.push(format!("{key}:{value}"));
    }

    let entities = entity_clauses.join(" AND ");
    let filters = filter_clauses.join(" AND ");
    match (entities.is_empty(), filters.is_empty()) {
        (_, true) => entities,
        (true, false) => filters,
        (false, false) => format!("{entities} {filters}"),
    }
}

pub struct QueryComposer {
    llm: Arc<dyn ResolutionLlm>,
    expand: bool,
}

impl QueryComposer {
    pub fn new(llm: Arc<dyn ResolutionLlm>, expand: bool) -> Self {
        Self { llm, expand }
    }

    /// Compose the query, preferring an LLM expansion when it is strictly
    /// longer than the deterministic string.
    pub async fn compose(&self, req: &QueryRequest) -> String {
        let base = build_base_query(req);
        if !self.expand || !req.has_entities() {
            return base;
        }

        let name = |e: &Option<ResolvedEntity>| e.as_ref().map(|e| e.canonical_name().to_string());
        let (organism, disease, data_type) = (name(&req.organism), name(&req.disease), name(&req.data_type));

        let expanded = self
            .llm
            .expand_query(organism.as_deref(), disease.as_deref(), data_type.as_deref())
            .await;

        if expanded.chars().count() > base.chars().count() {
            info!("Using LLM-expanded query");
            expanded
        } else {
            debug!(expanded = %expanded, "Discarding expansion no longer than base query");
            base
        }
    }
}
