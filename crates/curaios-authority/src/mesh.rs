//! MeSH summaries → disease records.
//!
//! Two payload shapes are accepted: the modern esummary document
//! (`ds_meshui`, `ds_meshterms`) and the descriptor layout with
//! `descriptorname`, `ui` and a `conceptlist` of term lists.

use serde_json::Value;

use curaios_common::AuthorityId;

use crate::error::AuthorityError;
use crate::eutils::summary_doc;
use crate::AuthorityRecord;

pub const DB: &str = "mesh";

/// Search term for the qualified retry after an empty plain search.
pub fn qualified_term(text: &str) -> String {
    format!("{text}[MeSH Terms]")
}

pub fn extract_descriptor(resp: &Value, uid: &str) -> Result<AuthorityRecord, AuthorityError> {
    let doc = summary_doc(resp, uid)?;

    let terms: Vec<&str> = doc["ds_meshterms"]
        .as_array()
        .map(|t| t.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let canonical_name = doc["descriptorname"]
        .as_str()
        .or_else(|| terms.first().copied())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthorityError::Malformed(format!("MeSH record {uid} has no descriptor name")))?
        .to_string();

    let descriptor_ui = doc["ds_meshui"]
        .as_str()
        .or_else(|| doc["ui"].as_str())
        .map(str::to_string)
        .or_else(|| ui_from_uid(uid))
        .ok_or_else(|| AuthorityError::Malformed(format!("MeSH record {uid} has no descriptor UI")))?;

    let mut alternatives: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let name = name.trim();
        if !name.is_empty() && name != canonical_name && !alternatives.iter().any(|a| a == name) {
            alternatives.push(name.to_string());
        }
    };

    for term in &terms {
        push(*term);
    }
    for concept in doc["conceptlist"].as_array().into_iter().flatten() {
        for term in concept["termlist"].as_array().into_iter().flatten() {
            if let Some(name) = term["termname"].as_str() {
                push(name);
            }
        }
    }

    Ok(AuthorityRecord {
        canonical_name,
        authority_id: AuthorityId::Mesh(descriptor_ui),
        alternatives,
        confidence: None,
    })
}

/// Descriptor UIDs in the mesh database are `68` followed by the numeric part
/// of the `D` identifier, e.g. 68000544 → D000544.
fn ui_from_uid(uid: &str) -> Option<String> {
    if uid.starts_with('D') {
        return Some(uid.to_string());
    }
    uid.strip_prefix("68")
        .filter(|rest| rest.len() == 6 && rest.chars().all(|c| c.is_ascii_digit()))
        .map(|rest| format!("D{rest}"))
}
