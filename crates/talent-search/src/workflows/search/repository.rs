use std::sync::Arc;

use crate::workflows::candidates::CandidateRecord;

/// Immutable view of the candidate store at one revision.
#[derive(Debug, Clone, Default)]
pub struct CandidateSnapshot {
    pub revision: u64,
    pub records: Arc<Vec<CandidateRecord>>,
}

impl CandidateSnapshot {
    pub fn new(revision: u64, records: Vec<CandidateRecord>) -> Self {
        Self {
            revision,
            records: Arc::new(records),
        }
    }
}

/// Read side of the applicant store. Implementations bump the revision on every write.
pub trait CandidateSource: Send + Sync {
    fn snapshot(&self) -> Result<CandidateSnapshot, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("candidate source unavailable: {0}")]
    Unavailable(String),
}
