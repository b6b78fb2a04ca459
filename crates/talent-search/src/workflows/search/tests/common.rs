use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::config::SearchConfig;
use crate::workflows::candidates::{
    CandidateId, CandidateRecord, CitizenshipStatus, Classification, EquityProfile,
    LanguageProfile, PoolCandidateStatus, PoolId, PriorityCategory, PriorityClaims, SkillId,
};
use crate::workflows::search::repository::{CandidateSnapshot, CandidateSource, SourceError};
use crate::workflows::search::{
    search_router, StandardWeightTable, TalentSearchService, WeightTable,
};

pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn skills(ids: &[&str]) -> BTreeSet<SkillId> {
    ids.iter().map(|id| SkillId(id.to_string())).collect()
}

pub(super) fn candidate(id: &str) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(id.to_string()),
        pool_id: PoolId("pool-it-02".to_string()),
        user_id: format!("user-{id}"),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: format!("{id}@example.org"),
        notes: None,
        status: PoolCandidateStatus::QualifiedAvailable,
        pool_classification: Classification::new("IT", 2),
        expected_classifications: BTreeSet::new(),
        equity: EquityProfile::default(),
        language: LanguageProfile::default(),
        accepted_operational_requirements: BTreeSet::new(),
        location_preferences: BTreeSet::new(),
        position_duration: BTreeSet::new(),
        skills: BTreeSet::new(),
        experiences: Vec::new(),
        expected_salary: BTreeSet::new(),
        priority: PriorityClaims {
            citizenship: Some(CitizenshipStatus::Citizen),
            ..PriorityClaims::default()
        },
        expiry_date: Some(date(2026, 9, 30)),
        suspended_at: None,
        submitted_at: Some(as_of() - chrono::Duration::days(30)),
        is_gov_employee: false,
        has_diploma: false,
        is_flagged: false,
    }
}

pub(super) fn named(id: &str, first: &str, last: &str) -> CandidateRecord {
    let mut record = candidate(id);
    record.first_name = first.to_string();
    record.last_name = last.to_string();
    record
}

pub(super) fn search_config() -> SearchConfig {
    SearchConfig {
        default_page_size: 10,
        max_page_size: 100,
        cache_capacity: 8,
        weights_path: None,
        candidates_csv: None,
    }
}

/// Status weights 1 for QUALIFIED_AVAILABLE and 2 for PLACED_TERM; priority 1 for entitlement, 5 otherwise.
pub(super) fn scenario_weights() -> StandardWeightTable {
    let status = BTreeMap::from([
        (PoolCandidateStatus::QualifiedAvailable, 1),
        (PoolCandidateStatus::PlacedTerm, 2),
    ]);
    let priority = BTreeMap::from([
        (PriorityCategory::PriorityEntitlement, 1),
        (PriorityCategory::Veteran, 5),
        (PriorityCategory::CitizenOrPermanentResident, 5),
        (PriorityCategory::Other, 5),
    ]);
    StandardWeightTable::new(status, priority).expect("distinct weights")
}

#[derive(Default)]
pub(super) struct MemorySource {
    records: Mutex<Vec<CandidateRecord>>,
    revision: AtomicU64,
    snapshots: AtomicUsize,
}

impl MemorySource {
    pub(super) fn with_records(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            revision: AtomicU64::new(1),
            snapshots: AtomicUsize::new(0),
        }
    }

    pub(super) fn push(&self, record: CandidateRecord) {
        self.records
            .lock()
            .expect("source mutex poisoned")
            .push(record);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    pub(super) fn snapshot_calls(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

impl CandidateSource for MemorySource {
    fn snapshot(&self) -> Result<CandidateSnapshot, SourceError> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().expect("source mutex poisoned").clone();
        Ok(CandidateSnapshot::new(
            self.revision.load(Ordering::SeqCst),
            records,
        ))
    }
}

pub(super) struct UnavailableSource;

impl CandidateSource for UnavailableSource {
    fn snapshot(&self) -> Result<CandidateSnapshot, SourceError> {
        Err(SourceError::Unavailable("applicant store offline".to_string()))
    }
}

pub(super) fn build_service(
    records: Vec<CandidateRecord>,
) -> (TalentSearchService<MemorySource>, Arc<MemorySource>) {
    build_service_with(records, Arc::new(StandardWeightTable::standard()))
}

pub(super) fn build_service_with(
    records: Vec<CandidateRecord>,
    weights: Arc<dyn WeightTable>,
) -> (TalentSearchService<MemorySource>, Arc<MemorySource>) {
    let source = Arc::new(MemorySource::with_records(records));
    let service = TalentSearchService::new(source.clone(), weights, search_config());
    (service, source)
}

pub(super) fn router_with_records(records: Vec<CandidateRecord>) -> axum::Router {
    let (service, _) = build_service(records);
    search_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn ids(results: &[crate::workflows::search::MatchResult]) -> Vec<String> {
    results
        .iter()
        .map(|result| result.candidate_id.0.clone())
        .collect()
}
