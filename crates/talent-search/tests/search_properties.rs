mod support;

use std::collections::BTreeSet;

use proptest::prelude::*;
use support::{as_of, sample_records, service_for};
use talent_search::workflows::candidates::{
    CandidateId, CandidateRecord, PoolCandidateStatus, SkillId, WireValue, WorkRegion,
};
use talent_search::workflows::search::{
    CallerIdentity, CompositeFilter, PageRequest, PoolCriteria, SortClause, SortColumn, SortSpec,
};

const SKILLS: [&str; 6] = ["sql", "rust", "cobol", "policy", "networking", "leadership"];

fn skill_set() -> impl Strategy<Value = BTreeSet<SkillId>> {
    prop::collection::btree_set(prop::sample::select(SKILLS.to_vec()), 0..4)
        .prop_map(|names| names.into_iter().map(|name| SkillId(name.to_string())).collect())
}

fn region_set() -> impl Strategy<Value = BTreeSet<WorkRegion>> {
    prop::collection::btree_set(prop::sample::select(WorkRegion::ALL.to_vec()), 0..4)
}

/// Records built from the first sample row with randomized skills, regions and status.
fn records() -> impl Strategy<Value = Vec<CandidateRecord>> {
    prop::collection::vec(
        (
            skill_set(),
            region_set(),
            prop::sample::select(PoolCandidateStatus::ALL.to_vec()),
            any::<bool>(),
        ),
        0..40,
    )
    .prop_map(|rows| {
        let template = sample_records().remove(0);
        rows.into_iter()
            .enumerate()
            .map(|(index, (skills, regions, status, flagged))| {
                let mut record = template.clone();
                record.id = CandidateId(format!("pc-{index:03}"));
                record.skills = skills;
                record.location_preferences = regions;
                record.status = status;
                record.is_flagged = flagged;
                record
            })
            .collect()
    })
}

fn page(size: usize, index: usize) -> PageRequest {
    PageRequest::new(size as i64, index as i64).expect("valid page")
}

proptest! {
    #[test]
    fn default_criteria_match_every_record(records in records()) {
        let expected = records.len();
        let service = service_for(records);

        prop_assert_eq!(service.count(&PoolCriteria::default(), as_of()).unwrap(), expected);
    }

    #[test]
    fn empty_disjunctive_set_matches_nothing(records in records()) {
        let service = service_for(records);
        let criteria = PoolCriteria::default().with_location_preferences([]);

        prop_assert_eq!(service.count(&criteria, as_of()).unwrap(), 0);
    }

    #[test]
    fn skills_match_only_when_all_are_held(held in skill_set(), required in skill_set()) {
        let mut record = sample_records().remove(0);
        record.skills = held.clone();
        record.experiences.clear();
        let filter = CompositeFilter::compose(&PoolCriteria::default().with_skills(required.clone()));

        prop_assert_eq!(filter.matches(&record, as_of()), required.is_subset(&held));
    }

    #[test]
    fn search_is_idempotent(records in records(), size in 1usize..15) {
        let service = service_for(records);
        let sort = SortSpec::new(vec![SortClause::desc(SortColumn::Flagged)]);
        let run = || {
            service
                .search(&PoolCriteria::default(), as_of(), page(size, 1), &sort, &CallerIdentity::anonymous())
                .unwrap()
        };

        prop_assert_eq!(run(), run());
    }

    #[test]
    fn pages_concatenate_to_the_full_result(records in records(), size in 1usize..10) {
        let service = service_for(records);
        let criteria = PoolCriteria::default().with_location_preferences([WorkRegion::Telework, WorkRegion::Ontario]);
        let sort = SortSpec::default();
        let caller = CallerIdentity::anonymous();

        let total = service.count(&criteria, as_of()).unwrap();
        let whole = service
            .search(&criteria, as_of(), page(total.max(1), 1), &sort, &caller)
            .unwrap();

        let last_page = whole.paginator_info.total.div_ceil(size).max(1);
        let mut stitched = Vec::new();
        for index in 1..=last_page {
            let slice = service.search(&criteria, as_of(), page(size, index), &sort, &caller).unwrap();
            prop_assert_eq!(slice.paginator_info.last_page, last_page);
            stitched.extend(slice.data);
        }

        prop_assert_eq!(whole.data.len(), total);
        prop_assert_eq!(stitched, whole.data);
    }
}
