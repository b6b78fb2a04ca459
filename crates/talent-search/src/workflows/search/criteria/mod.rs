//! Filter criteria attached to a pool candidate search.
//!
//! Every criterion is optional. `None` leaves candidates unconstrained, while
//! `Some` of an empty set is a real constraint: disjunctive criteria (applied
//! classifications, regions, durations, pools, statuses, priority categories)
//! then match nothing, and superset criteria (skills, operational
//! requirements) are vacuously satisfied. Expected classifications are the
//! exception: an empty set there leaves candidates unconstrained.

mod criterion;
mod input;

pub use criterion::Criterion;
pub use input::{ClassificationInput, PoolCriteriaInput};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::workflows::candidates::{
    Classification, LanguageAbility, OperationalRequirement, PoolCandidateStatus, PoolId,
    PositionDuration, PriorityCategory, SkillId, WireValue, WorkRegion,
};

/// Employment equity flags; only flags set to `true` constrain the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EquitySelections {
    #[serde(default)]
    pub is_woman: Option<bool>,
    #[serde(default)]
    pub has_disability: Option<bool>,
    #[serde(default)]
    pub is_indigenous: Option<bool>,
    #[serde(default)]
    pub is_visible_minority: Option<bool>,
}

/// Which candidates to keep relative to their pool expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryFilter {
    Active,
    Expired,
    All,
}

impl WireValue for ExpiryFilter {
    const ALL: &'static [Self] = &[Self::Active, Self::Expired, Self::All];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::All => "ALL",
        }
    }
}

/// Which candidates to keep relative to a self-requested suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspendedFilter {
    Active,
    Suspended,
    All,
}

impl WireValue for SuspendedFilter {
    const ALL: &'static [Self] = &[Self::Active, Self::Suspended, Self::All];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::All => "ALL",
        }
    }
}

/// Validated, immutable filter for one query. Structural equality doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct PoolCriteria {
    /// Matched against the candidate's expected classifications.
    pub classifications: Option<BTreeSet<Classification>>,
    /// Matched against the classification of the pool the candidate applied to.
    pub applied_classifications: Option<BTreeSet<Classification>>,
    pub equity: Option<EquitySelections>,
    pub operational_requirements: Option<BTreeSet<OperationalRequirement>>,
    pub location_preferences: Option<BTreeSet<WorkRegion>>,
    pub position_duration: Option<BTreeSet<PositionDuration>>,
    pub skills: Option<BTreeSet<SkillId>>,
    pub language_ability: Option<LanguageAbility>,
    pub general_search: Option<String>,
    pub pools: Option<BTreeSet<PoolId>>,
    pub expiry_status: Option<ExpiryFilter>,
    pub statuses: Option<BTreeSet<PoolCandidateStatus>>,
    pub priority_categories: Option<BTreeSet<PriorityCategory>>,
    pub suspended_status: Option<SuspendedFilter>,
    pub is_gov_employee: Option<bool>,
    pub has_diploma: Option<bool>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl PoolCriteria {
    pub fn with_classifications<I>(mut self, classifications: I) -> Self
    where
        I: IntoIterator<Item = Classification>,
    {
        self.classifications = Some(classifications.into_iter().collect());
        self
    }

    pub fn with_applied_classifications<I>(mut self, classifications: I) -> Self
    where
        I: IntoIterator<Item = Classification>,
    {
        self.applied_classifications = Some(classifications.into_iter().collect());
        self
    }

    pub fn with_equity(mut self, equity: EquitySelections) -> Self {
        self.equity = Some(equity);
        self
    }

    pub fn with_operational_requirements<I>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = OperationalRequirement>,
    {
        self.operational_requirements = Some(requirements.into_iter().collect());
        self
    }

    pub fn with_location_preferences<I>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = WorkRegion>,
    {
        self.location_preferences = Some(regions.into_iter().collect());
        self
    }

    pub fn with_position_duration<I>(mut self, durations: I) -> Self
    where
        I: IntoIterator<Item = PositionDuration>,
    {
        self.position_duration = Some(durations.into_iter().collect());
        self
    }

    pub fn with_skills<I>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = SkillId>,
    {
        self.skills = Some(skills.into_iter().collect());
        self
    }

    pub fn with_language_ability(mut self, ability: LanguageAbility) -> Self {
        self.language_ability = Some(ability);
        self
    }

    pub fn with_general_search(mut self, term: impl Into<String>) -> Self {
        self.general_search = Some(term.into());
        self
    }

    pub fn with_pools<I>(mut self, pools: I) -> Self
    where
        I: IntoIterator<Item = PoolId>,
    {
        self.pools = Some(pools.into_iter().collect());
        self
    }

    pub fn with_expiry_status(mut self, filter: ExpiryFilter) -> Self {
        self.expiry_status = Some(filter);
        self
    }

    pub fn with_statuses<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = PoolCandidateStatus>,
    {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_priority_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = PriorityCategory>,
    {
        self.priority_categories = Some(categories.into_iter().collect());
        self
    }

    pub fn with_suspended_status(mut self, filter: SuspendedFilter) -> Self {
        self.suspended_status = Some(filter);
        self
    }

    /// True when no criterion is present, i.e. the query matches every candidate.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}
