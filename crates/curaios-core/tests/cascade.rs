//! Resolver cascade behaviour against fake adapters.

mod common;

use std::sync::Arc;

use common::{resolver, taxon, Failure, FakeAuthority, FakeLlm};
use curaios_authority::match_confidence;
use curaios_common::{confidence, AuthorityId, CuraiosError, EntityKind, Source};
use curaios_core::tiers::{FuzzyTier, LocalTableTier, ResolutionTier};
use curaios_core::{fuzzy, EntityInputs, KnowledgeBase, Resolver};

#[tokio::test]
async fn test_every_local_key_resolves_exactly() {
    let authority = Arc::new(FakeAuthority::empty());
    let llm = Arc::new(FakeLlm::echo());
    let r = resolver(authority.clone(), llm.clone());
    let kb = KnowledgeBase::builtin();

    for kind in EntityKind::ALL {
        for key in kb.table(kind).keys() {
            let e = r.resolve(key, kind).await.unwrap();
            assert_eq!(e.source(), Source::LocalMapping, "{kind} key {key:?}");
            assert_eq!(e.confidence(), 1.0);
            assert_eq!(e.original_input(), key);
        }
    }
    assert_eq!(authority.call_count(), 0);
    assert!(llm.resolve_calls().is_empty());
}

#[tokio::test]
async fn test_local_hit_carries_template() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let e = r.resolve("Human", EntityKind::Organism).await.unwrap();
    assert_eq!(e.canonical_name(), "Homo sapiens");
    assert_eq!(e.authority_id(), Some(&AuthorityId::Taxonomy(9606)));

    let e = r.resolve("alzheimer's", EntityKind::Disease).await.unwrap();
    assert_eq!(e.canonical_name(), "Alzheimer's Disease");
    assert_eq!(e.authority_id(), Some(&AuthorityId::Mesh("D000544".into())));
    assert_eq!(e.source(), Source::LocalMapping);
}

#[tokio::test]
async fn test_authority_receives_cleaned_original_case() {
    let authority = Arc::new(
        FakeAuthority::empty().with_record("Canis Lupus", taxon("Canis lupus familiaris", 9615, &["dog"], Some(0.95))),
    );
    let llm = Arc::new(FakeLlm::echo());
    let r = resolver(authority.clone(), llm.clone());

    let e = r.resolve("  Canis   Lupus ", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::AuthorityLookup);
    assert_eq!(e.canonical_name(), "Canis lupus familiaris");
    assert_eq!(e.confidence(), 0.95);
    assert_eq!(e.authority_id(), Some(&AuthorityId::Taxonomy(9615)));
    assert_eq!(e.original_input(), "  Canis   Lupus ");
    assert_eq!(authority.calls(), vec![("Canis Lupus".to_string(), EntityKind::Organism)]);
    assert!(llm.resolve_calls().is_empty());
}

#[tokio::test]
async fn test_authority_confidence_defaults() {
    let authority = Arc::new(FakeAuthority::empty().with_record("dog", taxon("Canis lupus familiaris", 9615, &[], None)));
    let r = resolver(authority, Arc::new(FakeLlm::echo()));
    let e = r.resolve("dog", EntityKind::Organism).await.unwrap();
    assert_eq!(e.confidence(), 0.8);
}

#[tokio::test]
async fn test_authority_beats_fuzzy() {
    let query = "zebrafsh";
    let kb = KnowledgeBase::builtin();
    let hit = fuzzy::best_match(query, kb.table(EntityKind::Organism).keys(), 0.85).unwrap();
    assert_eq!(hit.candidate, "zebrafish");

    let authority = Arc::new(FakeAuthority::empty().with_record(query, taxon("Danio rerio", 7955, &[], Some(0.85))));
    let r = resolver(authority, Arc::new(FakeLlm::echo()));
    assert_eq!(r.resolve(query, EntityKind::Organism).await.unwrap().source(), Source::AuthorityLookup);

    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let e = r.resolve(query, EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::FuzzyMapping);
    assert_eq!(e.canonical_name(), "Danio rerio");
    assert_eq!(e.confidence(), hit.score);
    assert_eq!(e.authority_id(), Some(&AuthorityId::Taxonomy(7955)));
}

#[tokio::test]
async fn test_authority_exact_name_stays_below_local_confidence() {
    let exact = match_confidence("Canis lupus", "Canis lupus", &[]);
    assert_eq!(exact, 1.0);
    let authority = Arc::new(FakeAuthority::empty().with_record("Canis lupus", taxon("Canis lupus", 9612, &[], Some(exact))));
    let r = resolver(authority, Arc::new(FakeLlm::echo()));

    let e = r.resolve("Canis lupus", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::AuthorityLookup);
    assert_eq!(e.confidence(), confidence::NON_LOCAL_MAX);
    assert!(e.confidence() < confidence::LOCAL_EXACT);
}

#[tokio::test]
async fn test_blank_authority_name_falls_through_to_fuzzy() {
    let authority = Arc::new(FakeAuthority::empty().with_record("zebrafsh", taxon("   ", 7955, &[], Some(0.9))));
    let r = resolver(authority.clone(), Arc::new(FakeLlm::echo()));

    let e = r.resolve("zebrafsh", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::FuzzyMapping);
    assert_eq!(e.canonical_name(), "Danio rerio");
    assert_eq!(authority.call_count(), 1);
}

#[tokio::test]
async fn test_transient_authority_failure_falls_through() {
    let authority = Arc::new(FakeAuthority::failing(Failure::Transient));
    let llm = Arc::new(FakeLlm::echo().with_record("kitty", "Felis catus", Some(0.9)));
    let r = resolver(authority.clone(), llm.clone());

    let e = r.resolve("breast cancers", EntityKind::Disease).await.unwrap();
    assert_eq!(e.source(), Source::FuzzyMapping);
    assert_eq!(e.canonical_name(), "Breast Neoplasms");

    let e = r.resolve("kitty", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::Llm);
    assert_eq!(e.canonical_name(), "Felis catus");
    assert_eq!(e.confidence(), 0.9);
    assert_eq!(authority.call_count(), 2);
}

#[tokio::test]
async fn test_permanent_authority_failure_degrades_to_fallback() {
    let llm = Arc::new(FakeLlm::echo());
    let r = resolver(Arc::new(FakeAuthority::failing(Failure::Permanent)), llm.clone());

    let e = r.resolve("kitty CAT", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::Fallback);
    assert_eq!(e.canonical_name(), "Kitty cat");
    assert_eq!(e.confidence(), 0.5);
    assert!(llm.resolve_calls().is_empty());
}

#[tokio::test]
async fn test_data_type_never_consults_authority() {
    let authority = Arc::new(FakeAuthority::failing(Failure::Permanent));
    let llm = Arc::new(FakeLlm::echo());
    let r = resolver(authority.clone(), llm.clone());

    let e = r.resolve("single cell", EntityKind::DataType).await.unwrap();
    assert_eq!(e.source(), Source::KeywordMatch);
    assert_eq!(e.canonical_name(), "scRNAseq");
    assert_eq!(e.confidence(), 0.8);
    assert_eq!(authority.call_count(), 0);
    assert!(llm.resolve_calls().is_empty());
}

#[tokio::test]
async fn test_keyword_tier_only_for_data_types() {
    let llm = Arc::new(FakeLlm::echo());
    let r = resolver(Arc::new(FakeAuthority::empty()), llm.clone());

    // "exome" is a data-type variant but means nothing to the organism chain
    let e = r.resolve("exome", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::Llm);
    assert_eq!(llm.resolve_calls(), vec![("exome".to_string(), EntityKind::Organism)]);
}

#[tokio::test]
async fn test_llm_tier_for_unknown_data_type() {
    let llm = Arc::new(FakeLlm::echo().with_record("spatial expression", "Spatial Transcriptomics", Some(0.85)));
    let r = resolver(Arc::new(FakeAuthority::empty()), llm);
    let e = r.resolve("spatial expression", EntityKind::DataType).await.unwrap();
    assert_eq!(e.source(), Source::Llm);
    assert_eq!(e.canonical_name(), "Spatial Transcriptomics");
    assert!(e.authority_id().is_none());
}

#[tokio::test]
async fn test_llm_full_confidence_stays_below_local_confidence() {
    let llm = Arc::new(FakeLlm::echo().with_record("kitty", "Felis catus", Some(1.0)));
    let r = resolver(Arc::new(FakeAuthority::empty()), llm);

    let e = r.resolve("kitty", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::Llm);
    assert_eq!(e.confidence(), confidence::NON_LOCAL_MAX);
}

#[tokio::test]
async fn test_offline_llm_echo_is_tagged_llm() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let e = r.resolve("axolotl", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::Llm);
    assert_eq!(e.canonical_name(), "Axolotl");
    assert_eq!(e.confidence(), 0.5);
}

#[tokio::test]
async fn test_empty_llm_record_falls_back() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::silent()));
    let e = r.resolve("qwzx disorder", EntityKind::Disease).await.unwrap();
    assert_eq!(e.source(), Source::Fallback);
    assert_eq!(e.canonical_name(), "Qwzx disorder");
    assert_eq!(e.confidence(), 0.5);
    assert_eq!(e.original_input(), "qwzx disorder");
}

#[tokio::test]
async fn test_special_case_short_circuits() {
    let authority = Arc::new(FakeAuthority::empty());
    let llm = Arc::new(FakeLlm::echo());
    let r = resolver(authority.clone(), llm.clone());

    let e = r.resolve("Virus", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::SpecialCase);
    assert!(e.is_special_case());
    assert_eq!(e.canonical_name(), "Virus");
    assert_eq!(e.confidence(), 0.9);
    assert_eq!(e.expanded_terms().len(), 10);
    assert_eq!(authority.call_count(), 0);
    assert!(llm.resolve_calls().is_empty());

    let e = r.resolve("Infectious   Disease", EntityKind::Disease).await.unwrap();
    assert_eq!(e.canonical_name(), "Infectious disease");
    assert_eq!(e.expanded_terms(), &["infection".to_string(), "bacterial infection".into(), "viral infection".into()]);
}

#[tokio::test]
async fn test_special_case_for_other_kind_runs_cascade() {
    let authority = Arc::new(FakeAuthority::empty());
    let r = resolver(authority.clone(), Arc::new(FakeLlm::echo()));
    let e = r.resolve("cancer", EntityKind::Organism).await.unwrap();
    assert!(!e.is_special_case());
    assert_eq!(authority.call_count(), 1);
}

#[tokio::test]
async fn test_validation_errors_surface() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    assert!(matches!(r.resolve("   ", EntityKind::Organism).await, Err(CuraiosError::Validation(_))));
    assert!(matches!(r.resolve("x", EntityKind::Disease).await, Err(CuraiosError::Validation(_))));
    assert!(matches!(r.resolve("!!", EntityKind::DataType).await, Err(CuraiosError::Validation(_))));
}

#[tokio::test]
async fn test_normalise_rejects_empty() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    assert!(matches!(r.normalise("", EntityKind::Organism).await, Err(CuraiosError::Normalization(_))));
    let e = r.normalise("mouse", EntityKind::Organism).await.unwrap();
    assert_eq!(e.canonical_name(), "Mus musculus");
}

#[tokio::test]
async fn test_rna_rewrite_reaches_local_table() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let e = r.resolve("RNA", EntityKind::DataType).await.unwrap();
    assert_eq!(e.canonical_name(), "RNAseq");
    assert_eq!(e.source(), Source::LocalMapping);
    assert_eq!(e.original_input(), "RNA");
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let a = r.resolve("mice", EntityKind::Organism).await.unwrap();
    let b = r.resolve("mice", EntityKind::Organism).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[tokio::test]
async fn test_resolve_request_recombines_by_kind() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let inputs = EntityInputs {
        organism: Some("human".into()),
        disease: None,
        data_type: Some("scRNA-seq".into()),
    };
    let resolved = r.resolve_request(&inputs).await.unwrap();
    assert_eq!(resolved.organism.unwrap().canonical_name(), "Homo sapiens");
    assert!(resolved.disease.is_none());
    assert_eq!(resolved.data_type.unwrap().canonical_name(), "scRNAseq");
}

#[tokio::test]
async fn test_resolve_request_surfaces_validation_error() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let inputs = EntityInputs { organism: Some("human".into()), disease: Some("?".into()), data_type: None };
    assert!(r.resolve_request(&inputs).await.unwrap_err().is_validation());
}

#[test]
fn test_resolve_generic() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let e = r.resolve_generic("illumina HISEQ").unwrap();
    assert_eq!(e.canonical_name(), "Illumina hiseq");
    assert_eq!(e.source(), Source::Generic);
    assert_eq!(e.confidence(), 0.7);
    assert!(r.resolve_generic("SELECT * FROM users").is_err());
}

#[test]
fn test_default_chain_order() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    assert_eq!(
        r.tier_names(),
        vec!["local_mapping", "authority_lookup", "fuzzy_mapping", "keyword_match", "llm"]
    );
}

#[tokio::test]
async fn test_custom_chain_skips_adapters() {
    let kb = KnowledgeBase::builtin();
    let tiers: Vec<Box<dyn ResolutionTier>> = vec![
        Box::new(LocalTableTier::new(kb.clone())),
        Box::new(FuzzyTier::new(kb.clone(), confidence::DEFAULT_FUZZY_THRESHOLD)),
    ];
    let r = Resolver::with_tiers(kb, tiers);
    assert_eq!(r.tier_names(), vec!["local_mapping", "fuzzy_mapping"]);

    let e = r.resolve("zebrafsh", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::FuzzyMapping);
    assert_eq!(e.canonical_name(), "Danio rerio");

    let e = r.resolve("platypus", EntityKind::Organism).await.unwrap();
    assert_eq!(e.source(), Source::Fallback);
    assert_eq!(e.canonical_name(), "Platypus");
}
