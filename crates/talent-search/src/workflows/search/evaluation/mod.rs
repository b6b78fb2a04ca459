mod weights;

pub use weights::{StandardWeightTable, WeightTable, WeightTableError};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::filter::CompositeFilter;
use crate::workflows::candidates::{
    CandidateId, CandidateRecord, PoolCandidateStatus, PoolId, WireValue,
};

/// Reason a stored record could not be evaluated. The record is skipped, not the query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("candidate record has an empty id")]
    MissingId,
    #[error("candidate {id} has malformed classification `{value}`")]
    MalformedClassification { id: CandidateId, value: String },
    #[error("candidate {id} has status {status} with no configured weight")]
    UnweightedStatus { id: CandidateId, status: &'static str },
    #[error("candidate {id} falls in priority category {category} with no configured weight")]
    UnweightedPriority { id: CandidateId, category: &'static str },
}

/// Fields callers sort on and display; carried alongside the match outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub pool_id: PoolId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: PoolCandidateStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub expiry_date: Option<NaiveDate>,
    pub is_flagged: bool,
}

impl CandidateSummary {
    fn from_record(record: &CandidateRecord) -> Self {
        Self {
            pool_id: record.pool_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            status: record.status,
            submitted_at: record.submitted_at,
            expiry_date: record.expiry_date,
            is_flagged: record.is_flagged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: CandidateId,
    pub matched: bool,
    pub status_weight: u32,
    pub priority_weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_count: Option<usize>,
    pub candidate: CandidateSummary,
}

/// Applies a composed filter to one record and derives its ordering keys.
pub struct MatchEvaluator<'a> {
    weights: &'a dyn WeightTable,
}

impl<'a> MatchEvaluator<'a> {
    pub fn new(weights: &'a dyn WeightTable) -> Self {
        Self { weights }
    }

    /// Ordering keys are derived before any criterion runs, so they do not depend on the outcome.
    pub fn evaluate(
        &self,
        record: &CandidateRecord,
        filter: &CompositeFilter,
        as_of: DateTime<Utc>,
    ) -> Result<MatchResult, RecordError> {
        validate_record(record)?;

        let status_weight =
            self.weights
                .status_weight(record.status)
                .ok_or_else(|| RecordError::UnweightedStatus {
                    id: record.id.clone(),
                    status: record.status.as_str(),
                })?;
        let priority_weight =
            self.weights
                .priority_weight(record)
                .ok_or_else(|| RecordError::UnweightedPriority {
                    id: record.id.clone(),
                    category: record.priority.category().as_str(),
                })?;

        Ok(MatchResult {
            candidate_id: record.id.clone(),
            matched: filter.matches(record, as_of),
            status_weight,
            priority_weight,
            skill_count: filter.skill_count(record),
            candidate: CandidateSummary::from_record(record),
        })
    }
}

fn validate_record(record: &CandidateRecord) -> Result<(), RecordError> {
    if record.id.0.trim().is_empty() {
        return Err(RecordError::MissingId);
    }

    if let Some(bad) = record
        .classifications()
        .find(|classification| !classification.is_well_formed())
    {
        return Err(RecordError::MalformedClassification {
            id: record.id.clone(),
            value: format!("{}-{}", bad.group, bad.level),
        });
    }

    Ok(())
}
