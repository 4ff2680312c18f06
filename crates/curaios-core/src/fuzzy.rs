//! Edit-distance similarity over case-folded strings.

/// Normalized Levenshtein ratio in [0, 1], case-insensitive.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub candidate: &'a str,
    pub score: f64,
}

/// Highest-scoring candidate at or above `threshold`.
///
/// Ties keep the first candidate in iteration order.
pub fn best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<FuzzyMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.to_lowercase();
    let mut best: Option<FuzzyMatch<'a>> = None;

    for candidate in candidates {
        let score = strsim::normalized_levenshtein(&query, &candidate.to_lowercase());
        if best.map_or(true, |b| score > b.score) {
            best = Some(FuzzyMatch { candidate, score });
        }
    }

    best.filter(|b| b.score >= threshold)
}
