//! NCBI Taxonomy summaries → organism records.

use serde_json::Value;

use curaios_common::AuthorityId;

use crate::error::AuthorityError;
use crate::eutils::summary_doc;
use crate::AuthorityRecord;

pub const DB: &str = "taxonomy";

/// Build an organism record from an esummary payload.
///
/// Alternatives are the common name followed by every list under
/// `othernames`, deduplicated in first-seen order. Confidence is left for
/// the caller to score against the user's input.
pub fn extract_organism(resp: &Value, uid: &str) -> Result<AuthorityRecord, AuthorityError> {
    let doc = summary_doc(resp, uid)?;

    let taxon_id: u32 = uid
        .parse()
        .map_err(|_| AuthorityError::Malformed(format!("non-numeric taxonomy id '{uid}'")))?;

    let canonical_name = doc["scientificname"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthorityError::Malformed(format!("taxon {uid} has no scientific name")))?
        .to_string();

    let mut alternatives: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let name = name.trim();
        if !name.is_empty() && name != canonical_name && !alternatives.iter().any(|a| a == name) {
            alternatives.push(name.to_string());
        }
    };

    if let Some(common) = doc["commonname"].as_str() {
        push(common);
    }
    if let Some(genbank) = doc["genbankcommonname"].as_str() {
        push(genbank);
    }
    if let Some(other) = doc["othernames"].as_object() {
        for names in other.values() {
            for name in names.as_array().into_iter().flatten().filter_map(Value::as_str) {
                push(name);
            }
        }
    }

    Ok(AuthorityRecord {
        canonical_name,
        authority_id: AuthorityId::Taxonomy(taxon_id),
        alternatives,
        confidence: None,
    })
}
