use super::common::*;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::workflows::candidates::{CandidateId, Classification, PoolCandidateStatus};
use crate::workflows::search::{
    default_as_of, CallerIdentity, PageRequest, PoolCriteria, SearchError, SortSpec,
    SourceError, StandardWeightTable, TalentSearchService, ValidationError,
};

fn first_page(size: i64) -> PageRequest {
    PageRequest::new(size, 1).expect("valid page request")
}

#[test]
fn search_ranks_and_paginates_matches() {
    let mut screened = candidate("c-1");
    screened.status = PoolCandidateStatus::ScreenedIn;
    let (service, _) = build_service(vec![candidate("c-2"), screened, candidate("c-3")]);

    let page = service
        .search(
            &PoolCriteria::default(),
            as_of(),
            first_page(2),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("search succeeds");

    assert_eq!(ids(&page.data), vec!["c-1", "c-2"]);
    assert_eq!(page.paginator_info.total, 3);
    assert!(page.paginator_info.has_more_pages);
    assert_eq!(page.diagnostics.evaluated_records, 3);
    assert_eq!(page.diagnostics.skipped_records, 0);
}

#[test]
fn malformed_records_are_skipped_and_counted() {
    let mut broken = candidate("c-2");
    broken.pool_classification = Classification::new("", 3);
    let (service, _) = build_service(vec![candidate("c-1"), broken, candidate("c-3")]);

    let page = service
        .search(
            &PoolCriteria::default(),
            as_of(),
            first_page(10),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("search succeeds");

    assert_eq!(ids(&page.data), vec!["c-1", "c-3"]);
    assert_eq!(page.diagnostics.skipped_records, 1);
    assert_eq!(page.diagnostics.evaluated_records, 3);
}

#[test]
fn count_matches_search_total() {
    let mut other_pool = candidate("c-2");
    other_pool.pool_classification = Classification::new("PM", 5);
    let (service, _) = build_service(vec![candidate("c-1"), other_pool, candidate("c-3")]);
    let criteria =
        PoolCriteria::default().with_applied_classifications([Classification::new("IT", 2)]);

    let count = service.count(&criteria, as_of()).expect("count succeeds");
    let page = service
        .search(
            &criteria,
            as_of(),
            first_page(count as i64),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("search succeeds");

    assert_eq!(count, 2);
    assert_eq!(page.data.len(), count);
    assert_eq!(page.paginator_info.total, count);
}

#[test]
fn search_honours_page_sizes_above_the_request_maximum() {
    let records = (1..=101)
        .map(|index| candidate(&format!("c-{index:03}")))
        .collect();
    let (service, _) = build_service(records);
    let criteria = PoolCriteria::default();

    let count = service.count(&criteria, as_of()).expect("count succeeds");
    let page = service
        .search(
            &criteria,
            as_of(),
            first_page(i64::try_from(count).expect("count fits")),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("search succeeds");

    assert_eq!(count, 101);
    assert!(count > service.config().max_page_size);
    assert_eq!(page.data.len(), count);
    assert_eq!(page.paginator_info.total, count);
    assert!(!page.paginator_info.has_more_pages);
}

#[test]
fn bounded_page_request_applies_default_and_maximum() {
    let (service, source) = build_service(vec![candidate("c-1")]);

    let defaulted = service.bounded_page_request(None, 2).expect("default size");
    let error = service
        .bounded_page_request(Some(101), 1)
        .expect_err("page too large");

    assert_eq!(defaulted.page_size(), 10);
    assert_eq!(defaulted.page(), 2);
    assert!(matches!(
        error,
        ValidationError::AboveMaximum {
            field: "page_size",
            max: 100,
            ..
        }
    ));
    assert_eq!(source.snapshot_calls(), 0);
}

#[test]
fn default_as_of_is_truncated_to_the_minute() {
    use chrono::Timelike;

    let before = chrono::Utc::now();
    let instant = default_as_of();

    assert_eq!(instant.second(), 0);
    assert_eq!(instant.nanosecond(), 0);
    assert!(instant <= before + chrono::Duration::seconds(1));
    assert!(before - instant < chrono::Duration::seconds(61));
}

#[test]
fn unavailable_source_is_reported() {
    let service = TalentSearchService::new(
        Arc::new(UnavailableSource),
        Arc::new(StandardWeightTable::standard()),
        search_config(),
    );

    let error = service
        .count(&PoolCriteria::default(), as_of())
        .expect_err("source offline");

    assert!(matches!(
        error,
        SearchError::Source(SourceError::Unavailable(_))
    ));
}

#[test]
fn structurally_equal_criteria_hit_the_cache() {
    let (service, _) = build_service(vec![candidate("c-1"), candidate("c-2")]);
    let criteria = PoolCriteria::default().with_general_search("ada");

    let first = service
        .search(
            &criteria,
            as_of(),
            first_page(10),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("first search");
    let second = service
        .search(
            &criteria.clone(),
            as_of(),
            first_page(10),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("second search");

    assert_eq!(first, second);
    let stats = service.cache_stats().expect("cache enabled");
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn new_source_revision_invalidates_cached_matches() {
    let (service, source) = build_service(vec![candidate("c-1")]);
    let criteria = PoolCriteria::default();

    assert_eq!(service.count(&criteria, as_of()).expect("count"), 1);
    source.push(candidate("c-2"));
    assert_eq!(service.count(&criteria, as_of()).expect("count"), 2);

    let stats = service.cache_stats().expect("cache enabled");
    assert_eq!(stats.hits, 0);
}

#[test]
fn bookmarks_reorder_cached_matches_per_caller() {
    let (service, _) = build_service(vec![candidate("c-1"), candidate("c-2")]);
    let spec = SortSpec::new(vec![crate::workflows::search::SortClause::desc(
        crate::workflows::search::SortColumn::Bookmarked,
    )]);
    let caller = CallerIdentity {
        user_id: Some("recruiter".to_string()),
        bookmarks: [CandidateId("c-2".to_string())].into_iter().collect(),
    };

    let anonymous = service
        .search(&PoolCriteria::default(), as_of(), first_page(10), &spec, &CallerIdentity::anonymous())
        .expect("search");
    let bookmarked = service
        .search(&PoolCriteria::default(), as_of(), first_page(10), &spec, &caller)
        .expect("search");

    assert_eq!(ids(&anonymous.data), vec!["c-1", "c-2"]);
    assert_eq!(ids(&bookmarked.data), vec!["c-2", "c-1"]);
}

#[test]
fn disabled_cache_reports_no_stats() {
    let source = Arc::new(MemorySource::with_records(vec![candidate("c-1")]));
    let config = SearchConfig {
        cache_capacity: 0,
        ..search_config()
    };
    let service = TalentSearchService::new(source, Arc::new(StandardWeightTable::standard()), config);

    assert_eq!(service.count(&PoolCriteria::default(), as_of()).expect("count"), 1);
    assert!(service.cache_stats().is_none());
}
