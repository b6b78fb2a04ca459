mod support;

use support::{as_of, sample_records, service_for};
use talent_search::workflows::candidates::{Classification, SkillId};
use talent_search::workflows::search::{
    CallerIdentity, ExpiryFilter, PageRequest, PoolCriteria, PoolCriteriaInput, SortClause,
    SortColumn, SortSpec, SuspendedFilter,
};

fn ids(page: &talent_search::workflows::search::Page) -> Vec<&str> {
    page.data
        .iter()
        .map(|result| result.candidate_id.0.as_str())
        .collect()
}

fn search_all(criteria: &PoolCriteria) -> talent_search::workflows::search::Page {
    service_for(sample_records())
        .search(
            criteria,
            as_of(),
            PageRequest::new(100, 1).expect("valid page"),
            &SortSpec::default(),
            &CallerIdentity::anonymous(),
        )
        .expect("search succeeds")
}

#[test]
fn unconstrained_search_orders_by_status_then_priority() {
    let page = search_all(&PoolCriteria::default());

    assert_eq!(
        ids(&page),
        vec![
            "pc-005", "pc-003", "pc-009", "pc-002", "pc-001", "pc-007", "pc-006", "pc-004",
            "pc-010", "pc-008",
        ]
    );
    assert_eq!(page.diagnostics.evaluated_records, 10);
    assert_eq!(page.diagnostics.skipped_records, 0);
}

#[test]
fn skills_are_conjunctive() {
    let criteria = PoolCriteria::default().with_skills([
        SkillId("sql".to_string()),
        SkillId("rust".to_string()),
    ]);

    let page = search_all(&criteria);

    assert_eq!(ids(&page), vec!["pc-009", "pc-001", "pc-006"]);
    assert!(page
        .data
        .iter()
        .all(|result| result.skill_count == Some(2)));
}

#[test]
fn active_filters_drop_expired_and_suspended_candidates() {
    let criteria = PoolCriteria::default()
        .with_expiry_status(ExpiryFilter::Active)
        .with_suspended_status(SuspendedFilter::Active);

    let page = search_all(&criteria);

    assert_eq!(page.paginator_info.total, 8);
    assert!(!ids(&page).contains(&"pc-006"));
    assert!(!ids(&page).contains(&"pc-007"));
}

#[test]
fn classification_search_matches_expected_classifications_only() {
    let criteria =
        PoolCriteria::default().with_classifications([Classification::new("IT", 3)]);

    let page = search_all(&criteria);

    assert_eq!(ids(&page), vec!["pc-001"]);
}

#[test]
fn applied_classification_search_matches_pool_classifications() {
    let criteria =
        PoolCriteria::default().with_applied_classifications([Classification::new("IT", 3)]);

    let page = search_all(&criteria);

    assert_eq!(ids(&page), vec!["pc-009", "pc-004"]);
}

#[test]
fn criteria_input_round_trips_from_json_request() {
    let input: PoolCriteriaInput = serde_json::from_str(
        r#"{
            "operational_requirements": ["OVERTIME_REGULAR"],
            "location_preferences": ["TELEWORK", "NATIONAL_CAPITAL"],
            "language_ability": "BILINGUAL"
        }"#,
    )
    .expect("valid request");
    let criteria = PoolCriteria::try_from(input).expect("valid criteria");

    let page = search_all(&criteria);

    assert_eq!(ids(&page), vec!["pc-003", "pc-001"]);
}

#[test]
fn caller_sort_applies_within_equal_weights() {
    let service = service_for(sample_records());
    let page = service
        .search(
            &PoolCriteria::default(),
            as_of(),
            PageRequest::new(3, 2).expect("valid page"),
            &SortSpec::new(vec![SortClause::desc(SortColumn::LastName)]),
            &CallerIdentity::anonymous(),
        )
        .expect("search succeeds");

    // Weight ties in the QUALIFIED_AVAILABLE / citizen band: Riel before Lovelace.
    assert_eq!(ids(&page), vec!["pc-002", "pc-007", "pc-001"]);
    assert_eq!(page.paginator_info.first_item, Some(4));
    assert_eq!(page.paginator_info.last_page, 4);
}
