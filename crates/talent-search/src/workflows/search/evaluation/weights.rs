use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::workflows::candidates::{
    CandidateRecord, PoolCandidateStatus, PriorityCategory, WireValue,
};

/// Ordering weights consulted while evaluating a record. Lower weights rank first.
pub trait WeightTable: Send + Sync {
    fn status_weight(&self, status: PoolCandidateStatus) -> Option<u32>;
    fn priority_weight(&self, record: &CandidateRecord) -> Option<u32>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeightTableError {
    #[error("failed to read weight table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid weight table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown {section} key `{key}` in weight table")]
    UnknownKey { section: &'static str, key: String },
    #[error("statuses {first} and {second} share weight {weight}")]
    DuplicateStatusWeight {
        weight: u32,
        first: &'static str,
        second: &'static str,
    },
}

/// Weight table keyed by status and by derived priority category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardWeightTable {
    status: BTreeMap<PoolCandidateStatus, u32>,
    priority: BTreeMap<PriorityCategory, u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWeightTable {
    #[serde(default)]
    status: BTreeMap<String, u32>,
    #[serde(default)]
    priority: BTreeMap<String, u32>,
}

const STANDARD_STATUS_ORDER: [PoolCandidateStatus; 18] = [
    PoolCandidateStatus::NewApplication,
    PoolCandidateStatus::ApplicationReview,
    PoolCandidateStatus::ScreenedIn,
    PoolCandidateStatus::UnderAssessment,
    PoolCandidateStatus::QualifiedAvailable,
    PoolCandidateStatus::PlacedCasual,
    PoolCandidateStatus::PlacedTerm,
    PoolCandidateStatus::PlacedIndeterminate,
    PoolCandidateStatus::QualifiedUnavailable,
    PoolCandidateStatus::QualifiedWithdrew,
    PoolCandidateStatus::ScreenedOutApplication,
    PoolCandidateStatus::ScreenedOutAssessment,
    PoolCandidateStatus::ScreenedOutNotInterested,
    PoolCandidateStatus::ScreenedOutNotResponsive,
    PoolCandidateStatus::Expired,
    PoolCandidateStatus::Removed,
    PoolCandidateStatus::Draft,
    PoolCandidateStatus::DraftExpired,
];

const STANDARD_PRIORITY_ORDER: [PriorityCategory; 4] = [
    PriorityCategory::PriorityEntitlement,
    PriorityCategory::Veteran,
    PriorityCategory::CitizenOrPermanentResident,
    PriorityCategory::Other,
];

impl StandardWeightTable {
    /// Built-in taxonomy: weights step by 10 in review order.
    pub fn standard() -> Self {
        let step = |index: usize| (index as u32 + 1) * 10;
        Self {
            status: STANDARD_STATUS_ORDER
                .iter()
                .enumerate()
                .map(|(index, status)| (*status, step(index)))
                .collect(),
            priority: STANDARD_PRIORITY_ORDER
                .iter()
                .enumerate()
                .map(|(index, category)| (*category, step(index)))
                .collect(),
        }
    }

    pub fn new(
        status: BTreeMap<PoolCandidateStatus, u32>,
        priority: BTreeMap<PriorityCategory, u32>,
    ) -> Result<Self, WeightTableError> {
        let mut seen: BTreeMap<u32, PoolCandidateStatus> = BTreeMap::new();
        for (candidate_status, weight) in &status {
            if let Some(existing) = seen.insert(*weight, *candidate_status) {
                return Err(WeightTableError::DuplicateStatusWeight {
                    weight: *weight,
                    first: existing.as_str(),
                    second: candidate_status.as_str(),
                });
            }
        }

        Ok(Self { status, priority })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WeightTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `{"status": {...}, "priority": {...}}`; omitted sections keep the standard weights.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WeightTableError> {
        let raw: RawWeightTable = serde_json::from_reader(reader)?;
        let standard = Self::standard();

        let status = if raw.status.is_empty() {
            standard.status
        } else {
            parse_section("status", raw.status)?
        };
        let priority = if raw.priority.is_empty() {
            standard.priority
        } else {
            parse_section("priority", raw.priority)?
        };

        Self::new(status, priority)
    }
}

fn parse_section<K: WireValue + Ord>(
    section: &'static str,
    raw: BTreeMap<String, u32>,
) -> Result<BTreeMap<K, u32>, WeightTableError> {
    raw.into_iter()
        .map(|(key, weight)| match K::parse_wire(&key) {
            Some(parsed) => Ok((parsed, weight)),
            None => Err(WeightTableError::UnknownKey { section, key }),
        })
        .collect()
}

impl Default for StandardWeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeightTable for StandardWeightTable {
    fn status_weight(&self, status: PoolCandidateStatus) -> Option<u32> {
        self.status.get(&status).copied()
    }

    fn priority_weight(&self, record: &CandidateRecord) -> Option<u32> {
        self.priority.get(&record.priority.category()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_table_orders_new_applications_before_drafts() {
        let table = StandardWeightTable::standard();

        assert_eq!(table.status_weight(PoolCandidateStatus::NewApplication), Some(10));
        assert_eq!(table.status_weight(PoolCandidateStatus::QualifiedAvailable), Some(50));
        assert_eq!(table.status_weight(PoolCandidateStatus::DraftExpired), Some(180));
        assert_eq!(table.status.len(), PoolCandidateStatus::ALL.len());
    }

    #[test]
    fn partial_json_overrides_only_the_given_section() {
        let raw = r#"{"priority": {"VETERAN": 1, "PRIORITY_ENTITLEMENT": 2, "CITIZEN_OR_PERMANENT_RESIDENT": 3, "OTHER": 4}}"#;

        let table = StandardWeightTable::from_reader(Cursor::new(raw)).expect("valid table");

        assert_eq!(table.priority.get(&PriorityCategory::Veteran), Some(&1));
        assert_eq!(table.status_weight(PoolCandidateStatus::ScreenedIn), Some(30));
    }

    #[test]
    fn duplicate_status_weights_are_rejected() {
        let raw = r#"{"status": {"NEW_APPLICATION": 5, "SCREENED_IN": 5}}"#;

        let error = StandardWeightTable::from_reader(Cursor::new(raw)).expect_err("duplicate");

        assert!(matches!(
            error,
            WeightTableError::DuplicateStatusWeight { weight: 5, .. }
        ));
    }

    #[test]
    fn unknown_status_key_is_rejected() {
        let raw = r#"{"status": {"HIRED": 5}}"#;

        let error = StandardWeightTable::from_reader(Cursor::new(raw)).expect_err("unknown key");

        match error {
            WeightTableError::UnknownKey { section, key } => {
                assert_eq!(section, "status");
                assert_eq!(key, "HIRED");
            }
            other => panic!("expected unknown key, got {other:?}"),
        }
    }
}
