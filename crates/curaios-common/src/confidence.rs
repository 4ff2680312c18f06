//! Confidence values attached to each resolution tier.
//!
//! Confidence is provenance-dependent and not calibrated across tiers. The
//! ordering callers may rely on is
//! local exact > authority > fuzzy > keyword > LLM > fallback.

/// Exact hit in a local mapping table. Reserved for that tier.
pub const LOCAL_EXACT: f64 = 1.0;

/// Used when an authority record carries no confidence of its own.
pub const AUTHORITY_DEFAULT: f64 = 0.8;

/// Special-case umbrella term expansion.
pub const SPECIAL_CASE: f64 = 0.9;

/// Data-type keyword/substring hit.
pub const KEYWORD_MATCH: f64 = 0.8;

/// Generic (untyped) input.
pub const GENERIC: f64 = 0.7;

/// LLM record that did not report a confidence.
pub const LLM_DEFAULT: f64 = 0.5;

/// Ultimate fallback and user overrides.
pub const FALLBACK: f64 = 0.5;

/// Ceiling for every tier except the exact local lookup.
pub const NON_LOCAL_MAX: f64 = 0.99;

/// Default minimum similarity for the fuzzy tier.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

/// Clamp a score into [0.0, 1.0]. NaN collapses to 0.0.
pub fn clamp(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Clamp, then keep the score strictly below [`LOCAL_EXACT`].
pub fn cap_non_local(score: f64) -> f64 {
    clamp(score).min(NON_LOCAL_MAX)
}
