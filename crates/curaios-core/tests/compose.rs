//! Query composition, with and without LLM expansion.

mod common;

use std::sync::Arc;

use common::{resolver, FakeAuthority, FakeLlm};
use curaios_common::{EntityKind, ResolvedEntity};
use curaios_core::{build_base_query, EntityInputs, QueryComposer, QueryRequest};

fn named(name: &str) -> ResolvedEntity {
    ResolvedEntity::user_override(name, name)
}

#[tokio::test]
async fn test_empty_request_composes_empty_string() {
    let llm = Arc::new(FakeLlm::echo().with_expansion("anything at all"));
    let composer = QueryComposer::new(llm.clone(), true);
    assert_eq!(composer.compose(&QueryRequest::default()).await, "");
    assert!(llm.expand_calls().is_empty());
}

#[tokio::test]
async fn test_full_request_contains_every_clause() {
    let composer = QueryComposer::new(Arc::new(FakeLlm::echo()), true);
    let req = QueryRequest {
        organism: Some(named("Homo sapiens")),
        disease: Some(named("Alzheimer's Disease")),
        data_type: Some(named("RNAseq")),
        min_samples: Some(10),
        date_range: Some("2020-2023".into()),
        ..Default::default()
    };
    let query = composer.compose(&req).await;
    for part in [
        "organism:(Homo sapiens)",
        "disease:(Alzheimer's Disease)",
        "data_type:(RNAseq)",
        "samples:>=10",
        "publication_date:[2020-01-01 TO 2023-12-31]",
    ] {
        assert!(query.contains(part), "missing {part} in {query}");
    }
}

#[tokio::test]
async fn test_special_case_virus_renders_every_member() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let virus = r.resolve("virus", EntityKind::Organism).await.unwrap();
    let members = virus.expanded_terms().to_vec();

    let req = QueryRequest { organism: Some(virus), ..Default::default() };
    let query = build_base_query(&req);
    let group = members.iter().map(|m| format!("({m})")).collect::<Vec<_>>().join(" OR ");
    assert_eq!(query, format!("organism:({group})"));
    assert!(query.contains("(HIV) OR (SARS-CoV-2)"));
    assert!(query.contains("(Dengue virus)"));
}

#[tokio::test]
async fn test_longer_expansion_is_accepted() {
    let expanded = "(Homo sapiens OR human) AND (Asthma OR bronchial asthma) AND (RNA-seq OR transcriptomics)";
    let llm = Arc::new(FakeLlm::echo().with_expansion(expanded));
    let composer = QueryComposer::new(llm.clone(), true);
    let req = QueryRequest {
        organism: Some(named("Homo sapiens")),
        disease: Some(named("Asthma")),
        ..Default::default()
    };
    assert_eq!(composer.compose(&req).await, expanded);
    assert_eq!(
        llm.expand_calls(),
        vec![(Some("Homo sapiens".to_string()), Some("Asthma".to_string()), None)]
    );
}

#[tokio::test]
async fn test_shorter_or_equal_expansion_is_discarded() {
    let req = QueryRequest { organism: Some(named("Homo sapiens")), ..Default::default() };
    let base = build_base_query(&req);

    let composer = QueryComposer::new(Arc::new(FakeLlm::echo().with_expansion("human")), true);
    assert_eq!(composer.compose(&req).await, base);

    let same_length = "x".repeat(base.chars().count());
    let composer = QueryComposer::new(Arc::new(FakeLlm::echo().with_expansion(&same_length)), true);
    assert_eq!(composer.compose(&req).await, base);

    // expansion failure surfaces as an empty string
    let composer = QueryComposer::new(Arc::new(FakeLlm::echo()), true);
    assert_eq!(composer.compose(&req).await, base);
}

#[tokio::test]
async fn test_expansion_gets_canonical_names_for_special_cases() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let cancer = r.resolve("Cancer", EntityKind::Disease).await.unwrap();

    let llm = Arc::new(FakeLlm::echo());
    let composer = QueryComposer::new(llm.clone(), true);
    composer.compose(&QueryRequest { disease: Some(cancer), ..Default::default() }).await;
    assert_eq!(llm.expand_calls(), vec![(None, Some("Cancer".to_string()), None)]);
}

#[tokio::test]
async fn test_expansion_can_be_disabled() {
    let llm = Arc::new(FakeLlm::echo().with_expansion("a much longer expanded query than the base one"));
    let composer = QueryComposer::new(llm.clone(), false);
    let req = QueryRequest { data_type: Some(named("WGS")), ..Default::default() };
    assert_eq!(composer.compose(&req).await, "data_type:(WGS)");
    assert!(llm.expand_calls().is_empty());
}

#[tokio::test]
async fn test_filters_without_entities_skip_expansion() {
    let llm = Arc::new(FakeLlm::echo().with_expansion("a much longer expanded query than the base one"));
    let composer = QueryComposer::new(llm.clone(), true);
    let req = QueryRequest {
        date_range: Some("last_5_years".into()),
        extra_filters: vec![("platform".into(), "Illumina".into())],
        ..Default::default()
    };
    assert_eq!(composer.compose(&req).await, "publication_date:last_5_years AND platform:Illumina");
    assert!(llm.expand_calls().is_empty());
}

#[tokio::test]
async fn test_resolve_then_compose() {
    let r = resolver(Arc::new(FakeAuthority::empty()), Arc::new(FakeLlm::echo()));
    let resolved = r
        .resolve_request(&EntityInputs {
            organism: Some("mouse".into()),
            disease: Some("asthma".into()),
            data_type: Some("rna-seq".into()),
        })
        .await
        .unwrap();
    let mut req = QueryRequest::from_entities(resolved);
    req.min_samples = Some(20);

    let composer = QueryComposer::new(Arc::new(FakeLlm::echo()), true);
    assert_eq!(
        composer.compose(&req).await,
        "organism:(Mus musculus) AND disease:(Asthma) AND data_type:(RNAseq) samples:>=20"
    );
}
