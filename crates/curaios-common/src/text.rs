/// First character upper-cased, the rest lower-cased.
///
/// Used for every degraded or fallback rendering of user input, so "hOMO
/// SAPIENS" and "homo sapiens" both become "Homo sapiens".
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
