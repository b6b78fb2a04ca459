use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_search::error::AppError;
use talent_search::workflows::candidates::{CandidateCsvImporter, CandidateRecord};
use talent_search::workflows::search::{
    CandidateSnapshot, CandidateSource, SourceError, StandardWeightTable, WeightTable,
};

pub(crate) const SAMPLE_CANDIDATES_CSV: &[u8] =
    include_bytes!("../../../crates/talent-search/pool_candidates_sample.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applicant store held in memory. Every replacement publishes a new revision.
#[derive(Default)]
pub(crate) struct InMemoryCandidateStore {
    current: Mutex<CandidateSnapshot>,
}

impl InMemoryCandidateStore {
    pub(crate) fn with_records(records: Vec<CandidateRecord>) -> Self {
        Self {
            current: Mutex::new(CandidateSnapshot::new(1, records)),
        }
    }

    pub(crate) fn replace(&self, records: Vec<CandidateRecord>) -> Result<u64, SourceError> {
        let mut guard = self.current.lock().map_err(|_| poisoned())?;
        let revision = guard.revision + 1;
        *guard = CandidateSnapshot::new(revision, records);
        Ok(revision)
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot()
            .map(|snapshot| snapshot.records.len())
            .unwrap_or_default()
    }
}

impl CandidateSource for InMemoryCandidateStore {
    fn snapshot(&self) -> Result<CandidateSnapshot, SourceError> {
        let guard = self.current.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }
}

fn poisoned() -> SourceError {
    SourceError::Unavailable("candidate store lock poisoned".to_string())
}

/// Configured weight table, or the built-in one when no file is set.
pub(crate) fn load_weights(path: Option<&Path>) -> Result<Arc<dyn WeightTable>, AppError> {
    match path {
        Some(path) => Ok(Arc::new(StandardWeightTable::from_path(path)?)),
        None => Ok(Arc::new(StandardWeightTable::standard())),
    }
}

/// Candidates from the given export, falling back to the bundled sample.
pub(crate) fn load_candidates(path: Option<&Path>) -> Result<Vec<CandidateRecord>, AppError> {
    match path {
        Some(path) => Ok(CandidateCsvImporter::from_path(path)?),
        None => Ok(CandidateCsvImporter::from_reader(SAMPLE_CANDIDATES_CSV)?),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Accepts RFC 3339 timestamps or bare dates, which resolve to midnight UTC.
pub(crate) fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = parse_date(raw)?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("'{raw}' has no midnight"))
}
