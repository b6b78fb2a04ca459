use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::criteria::{Criterion, PoolCriteria};
use crate::workflows::candidates::{CandidateRecord, SkillId};

/// Conjunction of every criterion present in a [`PoolCriteria`].
///
/// Building the filter never touches records; an empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositeFilter {
    criteria: Vec<Criterion>,
    requested_skills: Option<BTreeSet<SkillId>>,
}

impl CompositeFilter {
    pub fn compose(criteria: &PoolCriteria) -> Self {
        Self {
            criteria: Criterion::from_criteria(criteria),
            requested_skills: criteria.skills.clone(),
        }
    }

    pub fn matches(&self, record: &CandidateRecord, as_of: DateTime<Utc>) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.matches(record, as_of))
    }

    /// Number of requested skills the record holds, when skills were requested at all.
    pub fn skill_count(&self, record: &CandidateRecord) -> Option<usize> {
        let requested = self.requested_skills.as_ref()?;
        let held = record.skill_set();
        Some(requested.iter().filter(|skill| held.contains(skill)).count())
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
