/// Confidence that an authority record matches what the user typed.
///
/// | relation of input to record            | score |
/// |----------------------------------------|-------|
/// | equals canonical name                  | 1.0   |
/// | equals a listed alternative            | 0.95  |
/// | prefix of canonical name               | 0.9   |
/// | substring of canonical or alternative  | 0.85  |
/// | anything else                          | 0.8   |
///
/// All comparisons are case-insensitive.
pub fn match_confidence(input: &str, canonical: &str, alternatives: &[String]) -> f64 {
    let input = input.trim().to_lowercase();
    let canonical = canonical.to_lowercase();
    let alternatives: Vec<String> = alternatives.iter().map(|a| a.to_lowercase()).collect();

    if input == canonical {
        1.0
    } else if alternatives.iter().any(|a| *a == input) {
        0.95
    } else if canonical.starts_with(&input) {
        0.9
    } else if canonical.contains(&input) || alternatives.iter().any(|a| a.contains(&input)) {
        0.85
    } else {
        0.8
    }
}
