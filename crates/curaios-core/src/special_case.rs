use tracing::info;

use curaios_common::{capitalize, EntityKind, ResolvedEntity};

use crate::tables::KnowledgeBase;

/// Expand an umbrella term declared for `kind`.
///
/// `folded` is the cleaned, case-folded input. A term declared for another
/// kind does not match.
pub fn expand(kb: &KnowledgeBase, folded: &str, kind: EntityKind, original_input: &str) -> Option<ResolvedEntity> {
    let case = kb.special_cases.get(folded).filter(|c| c.kind == kind)?;
    info!(term = folded, kind = %kind, terms = case.expansion.len(), "Special-case expansion");
    Some(ResolvedEntity::special_case(capitalize(folded), case.expansion.clone(), original_input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curaios_common::Source;

    #[test]
    fn test_virus_expands_for_organism() {
        let kb = KnowledgeBase::builtin();
        let e = expand(&kb, "viruses", EntityKind::Organism, "Viruses").unwrap();
        assert_eq!(e.canonical_name(), "Viruses");
        assert_eq!(e.source(), Source::SpecialCase);
        assert_eq!(e.expanded_terms()[0], "HIV");
        assert_eq!(e.original_input(), "Viruses");
    }

    #[test]
    fn test_kind_mismatch_is_not_special() {
        let kb = KnowledgeBase::builtin();
        assert!(expand(&kb, "cancer", EntityKind::Organism, "cancer").is_none());
        assert!(expand(&kb, "virus", EntityKind::Disease, "virus").is_none());
        assert!(expand(&kb, "cancer", EntityKind::Disease, "cancer").is_some());
    }

    #[test]
    fn test_unknown_term() {
        let kb = KnowledgeBase::builtin();
        assert!(expand(&kb, "bacteria", EntityKind::Organism, "bacteria").is_none());
    }
}
