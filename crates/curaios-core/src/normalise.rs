//! Input cleaning and per-kind validation.
//!
//! Validators strip characters outside a per-kind allow-list and reject
//! inputs that end up too short. Suspicious-but-valid inputs (an organism
//! field that looks like a disease, an overly generic data type) only log a
//! warning. Generic input is additionally screened for injection patterns.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};

use curaios_common::{CuraiosError, EntityKind, Result};

const MIN_LEN: usize = 2;

const GENERIC_ORGANISM_TERMS: &[&str] = &["bacteria", "virus", "viruses", "fungi", "animal", "plant"];
const DISEASE_KEYWORDS: &[&str] = &["disease", "syndrome", "disorder", "infection", "cancer", "tumor"];
const ORGANISM_KEYWORDS: &[&str] = &["bacteria", "virus", "human", "mouse", "animal", "homo sapiens", "mus musculus"];
const GENERIC_DATA_TYPE_TERMS: &[&str] = &["sequencing", "analysis", "profiling", "data"];

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn organism_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s\-.]").unwrap())
}

fn disease_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s\-'.]").unwrap())
}

fn data_type_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s\-/.]").unwrap())
}

fn generic_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[^\w\s\-/.,'"]"#).unwrap())
}

fn dangerous_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"\b(select|insert|update|delete|drop|create|alter)\b.*\b(from|table|database)\b",
            r"\b(union\s+all|union\s+select)\b",
            r"--",
            r"/\*.*\*/",
            r"\bexec\b",
            r"\beval\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// Trim, collapse whitespace runs, and drop characters outside `[\w\s\-.]`.
pub fn clean_input(raw: &str) -> String {
    let collapsed = whitespace_re().replace_all(raw.trim(), " ");
    organism_strip_re().replace_all(&collapsed, "").into_owned()
}

fn strip(re: &Regex, input: &str) -> String {
    re.replace_all(input, "").into_owned()
}

fn ensure_len(cleaned: &str, what: &str) -> Result<()> {
    if cleaned.chars().count() < MIN_LEN {
        return Err(CuraiosError::Validation(format!("{what} is too short")));
    }
    Ok(())
}

/// Validate raw input for `kind`. Empty or whitespace-only input is rejected.
pub fn validate_input(raw: &str, kind: EntityKind) -> Result<String> {
    debug!(kind = %kind, input = raw, "Validating input");
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CuraiosError::Validation(format!("Input for {kind} cannot be empty")));
    }
    match kind {
        EntityKind::Organism => validate_organism(trimmed),
        EntityKind::Disease  => validate_disease(trimmed),
        EntityKind::DataType => validate_data_type(trimmed),
    }
}

pub fn validate_organism(input: &str) -> Result<String> {
    let cleaned = strip(organism_strip_re(), input);
    ensure_len(&cleaned, "Organism name")?;

    let lower = cleaned.to_lowercase();
    if GENERIC_ORGANISM_TERMS.contains(&lower.as_str()) {
        warn!(input = %lower, "Generic organism term");
    }
    if DISEASE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        warn!(input, "Input may be a disease rather than an organism");
    }
    Ok(cleaned)
}

pub fn validate_disease(input: &str) -> Result<String> {
    let cleaned = strip(disease_strip_re(), input);
    ensure_len(&cleaned, "Disease name")?;

    let lower = cleaned.to_lowercase();
    if ORGANISM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        warn!(input, "Input may be an organism rather than a disease");
    }
    Ok(cleaned)
}

pub fn validate_data_type(input: &str) -> Result<String> {
    let cleaned = strip(data_type_strip_re(), input);
    ensure_len(&cleaned, "Data type")?;

    let lower = cleaned.to_lowercase();
    match lower.as_str() {
        "rna" => {
            info!("Rewriting bare 'RNA' to 'RNAseq'");
            return Ok("RNAseq".to_string());
        }
        "scrna" => {
            info!("Rewriting bare 'scRNA' to 'scRNAseq'");
            return Ok("scRNAseq".to_string());
        }
        _ => {}
    }
    if GENERIC_DATA_TYPE_TERMS.contains(&lower.as_str()) {
        warn!(input, "Data type is too generic");
    }
    Ok(cleaned)
}

/// Validation for untyped input, e.g. free-form filter values.
pub fn validate_generic(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let cleaned = strip(generic_strip_re(), trimmed);
    ensure_len(&cleaned, "Input")?;

    // Checked before and after stripping so removed punctuation cannot
    // assemble or hide a pattern.
    let raw_lower = trimmed.to_lowercase();
    let cleaned_lower = cleaned.to_lowercase();
    if dangerous_patterns()
        .iter()
        .any(|re| re.is_match(&raw_lower) || re.is_match(&cleaned_lower))
    {
        warn!(input, "Potentially unsafe input");
        return Err(CuraiosError::Validation("Input contains potentially unsafe patterns".into()));
    }
    Ok(cleaned)
}
