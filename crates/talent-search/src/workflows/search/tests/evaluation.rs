use super::common::*;
use std::collections::BTreeMap;

use crate::workflows::candidates::{
    CandidateId, ClaimVerification, Classification, PoolCandidateStatus, PriorityCategory,
};
use crate::workflows::search::{
    CompositeFilter, MatchEvaluator, PoolCriteria, RecordError, StandardWeightTable,
};

#[test]
fn ordering_keys_are_computed_even_when_the_record_does_not_match() {
    let weights = StandardWeightTable::standard();
    let evaluator = MatchEvaluator::new(&weights);
    let filter = CompositeFilter::compose(&PoolCriteria::default().with_general_search("nobody"));

    let mut record = candidate("c-1");
    record.status = PoolCandidateStatus::ScreenedIn;

    let result = evaluator
        .evaluate(&record, &filter, as_of())
        .expect("record evaluates");

    assert!(!result.matched);
    assert_eq!(result.status_weight, 30);
    assert_eq!(result.priority_weight, 30);
    assert_eq!(result.candidate.status, PoolCandidateStatus::ScreenedIn);
}

#[test]
fn rejected_priority_entitlement_uses_the_next_category_weight() {
    let weights = StandardWeightTable::standard();
    let evaluator = MatchEvaluator::new(&weights);
    let filter = CompositeFilter::default();

    let mut entitled = candidate("c-1");
    entitled.priority.has_priority_entitlement = true;
    let mut rejected = candidate("c-2");
    rejected.priority.has_priority_entitlement = true;
    rejected.priority.priority_verification = Some(ClaimVerification::Rejected);

    let entitled = evaluator.evaluate(&entitled, &filter, as_of()).expect("ok");
    let rejected = evaluator.evaluate(&rejected, &filter, as_of()).expect("ok");

    assert_eq!(entitled.priority_weight, 10);
    assert_eq!(rejected.priority_weight, 30);
}

#[test]
fn malformed_records_yield_record_errors() {
    let weights = StandardWeightTable::standard();
    let evaluator = MatchEvaluator::new(&weights);
    let filter = CompositeFilter::default();

    let mut blank_id = candidate("c-1");
    blank_id.id = CandidateId("  ".to_string());
    assert_eq!(
        evaluator.evaluate(&blank_id, &filter, as_of()),
        Err(RecordError::MissingId)
    );

    let mut bad_classification = candidate("c-2");
    bad_classification.pool_classification = Classification::new("IT", 0);
    assert!(matches!(
        evaluator.evaluate(&bad_classification, &filter, as_of()),
        Err(RecordError::MalformedClassification { .. })
    ));
}

#[test]
fn statuses_missing_from_the_weight_table_are_reported() {
    let weights = StandardWeightTable::new(
        BTreeMap::from([(PoolCandidateStatus::QualifiedAvailable, 1)]),
        BTreeMap::from([(PriorityCategory::CitizenOrPermanentResident, 1)]),
    )
    .expect("valid table");
    let evaluator = MatchEvaluator::new(&weights);

    let mut draft = candidate("c-1");
    draft.status = PoolCandidateStatus::Draft;

    let error = evaluator
        .evaluate(&draft, &CompositeFilter::default(), as_of())
        .expect_err("draft has no weight");

    assert_eq!(
        error,
        RecordError::UnweightedStatus {
            id: CandidateId("c-1".to_string()),
            status: "DRAFT",
        }
    );
}
