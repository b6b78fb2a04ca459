#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use talent_search::config::SearchConfig;
use talent_search::workflows::candidates::{CandidateCsvImporter, CandidateRecord};
use talent_search::workflows::search::{
    CandidateSnapshot, CandidateSource, SourceError, StandardWeightTable, TalentSearchService,
};

pub const SAMPLE_CSV: &[u8] = include_bytes!("../../pool_candidates_sample.csv");

pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub fn sample_records() -> Vec<CandidateRecord> {
    CandidateCsvImporter::from_reader(SAMPLE_CSV).expect("sample export imports")
}

/// Fixed snapshot that never changes revision.
pub struct StaticSource {
    snapshot: CandidateSnapshot,
}

impl StaticSource {
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        Self {
            snapshot: CandidateSnapshot::new(1, records),
        }
    }
}

impl CandidateSource for StaticSource {
    fn snapshot(&self) -> Result<CandidateSnapshot, SourceError> {
        Ok(self.snapshot.clone())
    }
}

pub fn service_for(records: Vec<CandidateRecord>) -> TalentSearchService<StaticSource> {
    TalentSearchService::new(
        Arc::new(StaticSource::new(records)),
        Arc::new(StandardWeightTable::standard()),
        SearchConfig::default(),
    )
}
