use super::common::*;

use crate::workflows::search::{
    paginate, CompositeFilter, MatchEvaluator, MatchResult, PageRequest, StandardWeightTable,
    ValidationError,
};

fn results(count: usize) -> Vec<MatchResult> {
    let weights = StandardWeightTable::standard();
    let evaluator = MatchEvaluator::new(&weights);
    let filter = CompositeFilter::default();
    (1..=count)
        .map(|index| {
            evaluator
                .evaluate(&candidate(&format!("c-{index:02}")), &filter, as_of())
                .expect("valid")
        })
        .collect()
}

#[test]
fn page_request_rejects_non_positive_values() {
    assert_eq!(
        PageRequest::new(0, 1),
        Err(ValidationError::BelowMinimum {
            field: "page_size",
            value: 0,
        })
    );
    assert_eq!(
        PageRequest::new(10, -2),
        Err(ValidationError::BelowMinimum {
            field: "page",
            value: -2,
        })
    );
}

#[test]
fn page_request_respects_configured_maximum() {
    let request = PageRequest::new(500, 1).expect("positive");

    let error = request.within(100).expect_err("above maximum");

    assert_eq!(error.field(), "page_size");
    assert!(PageRequest::new(100, 1).expect("ok").within(100).is_ok());
}

#[test]
fn middle_page_reports_item_range() {
    let page = paginate(results(25), PageRequest::new(10, 2).expect("valid"));
    let info = &page.paginator_info;

    assert_eq!(ids(&page.data).first().map(String::as_str), Some("c-11"));
    assert_eq!(info.count, 10);
    assert_eq!(info.first_item, Some(11));
    assert_eq!(info.last_item, Some(20));
    assert_eq!(info.total, 25);
    assert_eq!(info.last_page, 3);
    assert!(info.has_more_pages);
    assert!(info.has_previous_page);
}

#[test]
fn last_partial_page_has_no_more_pages() {
    let page = paginate(results(25), PageRequest::new(10, 3).expect("valid"));

    assert_eq!(page.paginator_info.count, 5);
    assert_eq!(page.paginator_info.last_item, Some(25));
    assert!(!page.paginator_info.has_more_pages);
}

#[test]
fn page_beyond_the_end_is_empty_with_accurate_totals() {
    let page = paginate(results(3), PageRequest::new(10, 7).expect("valid"));
    let info = &page.paginator_info;

    assert!(page.data.is_empty());
    assert_eq!(info.total, 3);
    assert_eq!(info.last_page, 1);
    assert_eq!(info.first_item, None);
    assert!(!info.has_more_pages);
    assert!(info.has_previous_page);
}

#[test]
fn empty_result_set_still_has_one_page() {
    let page = paginate(Vec::new(), PageRequest::new(5, 1).expect("valid"));

    assert_eq!(page.paginator_info.last_page, 1);
    assert_eq!(page.paginator_info.total, 0);
    assert!(!page.paginator_info.has_previous_page);
}
