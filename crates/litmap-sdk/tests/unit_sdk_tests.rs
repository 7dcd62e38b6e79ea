//! Integration tests for the litmap SDK
//!
//! Drives the engine the way a list page does: populate a mapping, filter
//! its lists and maintain automated views.

use litmap_sdk::{
    EngineConfig, FilterErrorKind, LitmapEngine, LitmapEngineBuilder, ListId, NewPublication,
    PropagationConfig, PublicationId, ReviewFieldType, ReviewerId, SdkError,
};

const LEADER: ReviewerId = ReviewerId(1);

struct Fixture {
    engine: LitmapEngine,
    list: ListId,
    papers: Vec<PublicationId>,
}

/// One mapping with a coding field, one manual list holding papers from
/// 2017, 2019 and 2022 tagged `survey`, `ml` and `ml, survey`.
async fn fixture(config: EngineConfig) -> Fixture {
    let engine = LitmapEngineBuilder::new().with_config(config).build().unwrap();
    let service = engine.service();

    let mapping = service.create_mapping("Test-driven development", LEADER).await;
    let method = service
        .create_field(mapping, "method", ReviewFieldType::Coding)
        .await
        .unwrap();
    let list = service.create_list(mapping, LEADER, "All").await.unwrap();

    let mut papers = Vec::new();
    for (i, (year, codes)) in [(2017, "survey"), (2019, "ml"), (2022, "ml, survey")]
        .into_iter()
        .enumerate()
    {
        let id = service
            .add_publication(NewPublication::new(
                format!("10.1000/tdd.{}", i),
                format!("Paper {}", i),
                year,
            ))
            .await;
        service.set_value(method, id, None, codes).await.unwrap();
        papers.push(id);
    }
    service.add_publications(list, papers.clone()).await.unwrap();

    Fixture {
        engine,
        list,
        papers,
    }
}

fn ids(outcome: &litmap_sdk::FilterOutcome) -> Vec<PublicationId> {
    outcome.publications.iter().map(|p| p.id).collect()
}

// ============================================================================
// Filtering
// ============================================================================

#[tokio::test]
async fn test_filter_empty_text_returns_whole_list() {
    let f = fixture(EngineConfig::default()).await;
    let outcome = f.engine.filter(f.list, "").await.unwrap();

    assert!(outcome.is_filtered());
    assert_eq!(ids(&outcome), vec![f.papers[2], f.papers[1], f.papers[0]]);
}

#[tokio::test]
async fn test_filter_attribute_and_review_field() {
    let f = fixture(EngineConfig::default()).await;
    let outcome = f
        .engine
        .filter(f.list, "(year__gte=2018) and (method=survey)")
        .await
        .unwrap();

    assert!(outcome.error.is_none());
    assert_eq!(ids(&outcome), vec![f.papers[2]]);
}

#[tokio::test]
async fn test_filter_not() {
    let f = fixture(EngineConfig::default()).await;
    let outcome = f.engine.filter(f.list, "not (method=ml)").await.unwrap();
    assert_eq!(ids(&outcome), vec![f.papers[0]]);
}

#[tokio::test]
async fn test_filter_uses_configured_order() {
    let f = fixture(EngineConfig::default().with_default_order("year")).await;
    let outcome = f.engine.filter(f.list, "").await.unwrap();
    assert_eq!(ids(&outcome), f.papers);
}

#[tokio::test]
async fn test_filter_ordered_rejects_unknown_order() {
    let f = fixture(EngineConfig::default()).await;
    let result = f.engine.filter_ordered(f.list, "", "-rating", None).await;
    assert!(matches!(result, Err(SdkError::RuntimeError(_))));
}

#[tokio::test]
async fn test_filter_missing_list_is_error() {
    let f = fixture(EngineConfig::default()).await;
    assert!(f.engine.filter(ListId(999), "").await.is_err());
}

// ============================================================================
// Filter Reports
// ============================================================================

#[tokio::test]
async fn test_syntax_error_returns_unfiltered_list() {
    let f = fixture(EngineConfig::default()).await;
    let outcome = f.engine.filter(f.list, "(year=2019").await.unwrap();

    let report = outcome.error.as_ref().unwrap();
    assert_eq!(report.kind, FilterErrorKind::Syntax);
    assert_eq!(
        report.message,
        "The filter text: (year=2019 has syntax errors. Please double check."
    );
    assert_eq!(outcome.filter_text, "(year=2019");
    assert_eq!(outcome.publications.len(), 3);
}

#[tokio::test]
async fn test_unknown_field_report() {
    let f = fixture(EngineConfig::default()).await;
    let outcome = f.engine.filter(f.list, "(rating=3)").await.unwrap();

    let report = outcome.error.unwrap();
    assert_eq!(report.kind, FilterErrorKind::UnknownField);
    assert!(report.message.contains("rating"));
    assert_eq!(outcome.publications.len(), 3);
}

#[tokio::test]
async fn test_unsupported_comparison_report() {
    let f = fixture(EngineConfig::default()).await;
    let outcome = f.engine.filter(f.list, "(year__icontains=20)").await.unwrap();
    assert_eq!(
        outcome.error.unwrap().kind,
        FilterErrorKind::UnsupportedComparison
    );
}

#[tokio::test]
async fn test_check_filter() {
    let f = fixture(EngineConfig::default()).await;
    let mapping = f.engine.service().list(f.list).await.unwrap().mapping;

    assert!(f
        .engine
        .check_filter(mapping, "(method=ml)", None)
        .await
        .is_none());
    let report = f
        .engine
        .check_filter(mapping, "(year=abc)", Some(LEADER))
        .await
        .unwrap();
    assert_eq!(report.kind, FilterErrorKind::InvalidValue);
}

#[tokio::test]
async fn test_filter_ordered_as_reviewer() {
    let f = fixture(EngineConfig::default()).await;
    let service = f.engine.service();
    let mapping = service.list(f.list).await.unwrap().mapping;
    let method = service
        .read()
        .await
        .field_by_name(mapping, "method")
        .unwrap()
        .id;
    service
        .set_value(method, f.papers[0], Some(ReviewerId(2)), "rct")
        .await
        .unwrap();

    let own = f
        .engine
        .filter_ordered(f.list, "(method=rct)", "-id", Some(ReviewerId(2)))
        .await
        .unwrap();
    assert_eq!(ids(&own), vec![f.papers[0]]);

    let other = f
        .engine
        .filter_ordered(f.list, "(method=rct)", "-id", Some(ReviewerId(3)))
        .await
        .unwrap();
    assert!(other.is_filtered());
    assert!(other.publications.is_empty());

    let shared = f
        .engine
        .filter_ordered(f.list, "(method=ml)", "-id", Some(ReviewerId(3)))
        .await
        .unwrap();
    assert_eq!(ids(&shared), vec![f.papers[2], f.papers[1]]);
}

// ============================================================================
// Automated Lists
// ============================================================================

#[tokio::test]
async fn test_create_view_fills_and_follows() {
    let f = fixture(EngineConfig::default()).await;
    let (view, report) = f
        .engine
        .create_view(f.list, LEADER, "ML", "(method=ml)")
        .await
        .unwrap();
    assert_eq!(report.added_to(view), vec![f.papers[1], f.papers[2]]);

    let service = f.engine.service();
    let late = service
        .add_publication(NewPublication::new("10.1000/tdd.late", "Late", 2023))
        .await;
    let mapping = service.list(f.list).await.unwrap().mapping;
    let method = service
        .read()
        .await
        .field_by_name(mapping, "method")
        .unwrap()
        .id;
    service.set_value(method, late, None, "ml").await.unwrap();
    let report = service.add_publications(f.list, vec![late]).await.unwrap();

    assert_eq!(report.added_to(view), vec![late]);
}

#[tokio::test]
async fn test_create_view_rejects_broken_criteria() {
    let f = fixture(EngineConfig::default()).await;
    let result = f
        .engine
        .create_view(f.list, LEADER, "Broken", "(method=ml")
        .await;

    assert!(matches!(result, Err(SdkError::CompileError(_))));
    let mapping = f.engine.service().list(f.list).await.unwrap().mapping;
    assert_eq!(f.engine.service().read().await.lists(mapping).len(), 1);
}

#[tokio::test]
async fn test_step_limit_from_config() {
    let config = EngineConfig::default().with_propagation(PropagationConfig {
        max_depth: 32,
        max_steps: 1,
    });
    let f = fixture(config).await;
    let service = f.engine.service();

    f.engine
        .create_view(f.list, LEADER, "A", "")
        .await
        .unwrap();
    f.engine
        .create_view(f.list, LEADER, "B", "")
        .await
        .unwrap();

    let late = service
        .add_publication(NewPublication::new("10.1000/tdd.late", "Late", 2023))
        .await;
    let report = service.add_publications(f.list, vec![late]).await.unwrap();
    assert!(report.truncated);
    assert_eq!(report.steps, 1);
}
