use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::{EquitySelections, ExpiryFilter, PoolCriteria, SuspendedFilter};
use crate::workflows::candidates::{
    CandidateRecord, Classification, LanguageAbility, OperationalRequirement, PoolCandidateStatus,
    PoolId, PositionDuration, PriorityCategory, SkillId, WorkRegion,
};

/// Atomic predicate over a single candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Classification(BTreeSet<Classification>),
    AppliedClassification(BTreeSet<Classification>),
    Equity(EquitySelections),
    OperationalRequirements(BTreeSet<OperationalRequirement>),
    Location(BTreeSet<WorkRegion>),
    PositionDuration(BTreeSet<PositionDuration>),
    Skills(BTreeSet<SkillId>),
    LanguageAbility(LanguageAbility),
    GeneralSearch(String),
    Pools(BTreeSet<PoolId>),
    Expiry(ExpiryFilter),
    Status(BTreeSet<PoolCandidateStatus>),
    PriorityCategory(BTreeSet<PriorityCategory>),
    Suspended(SuspendedFilter),
    GovEmployee(bool),
    Diploma(bool),
    Name(String),
    Email(String),
    Notes(String),
}

impl Criterion {
    /// Expands the present fields of `criteria` into predicates, skipping absent ones.
    pub fn from_criteria(criteria: &PoolCriteria) -> Vec<Criterion> {
        let mut criteria_list = Vec::new();
        let mut push = |criterion: Option<Criterion>| {
            if let Some(criterion) = criterion {
                criteria_list.push(criterion);
            }
        };

        push(criteria.classifications.clone().map(Criterion::Classification));
        push(
            criteria
                .applied_classifications
                .clone()
                .map(Criterion::AppliedClassification),
        );
        push(criteria.equity.map(Criterion::Equity));
        push(
            criteria
                .operational_requirements
                .clone()
                .map(Criterion::OperationalRequirements),
        );
        push(criteria.location_preferences.clone().map(Criterion::Location));
        push(criteria.position_duration.clone().map(Criterion::PositionDuration));
        push(criteria.skills.clone().map(Criterion::Skills));
        push(criteria.language_ability.map(Criterion::LanguageAbility));
        push(search_term(&criteria.general_search).map(Criterion::GeneralSearch));
        push(criteria.pools.clone().map(Criterion::Pools));
        push(criteria.expiry_status.map(Criterion::Expiry));
        push(criteria.statuses.clone().map(Criterion::Status));
        push(criteria.priority_categories.clone().map(Criterion::PriorityCategory));
        push(criteria.suspended_status.map(Criterion::Suspended));
        push(criteria.is_gov_employee.map(Criterion::GovEmployee));
        push(criteria.has_diploma.map(Criterion::Diploma));
        push(search_term(&criteria.name).map(Criterion::Name));
        push(search_term(&criteria.email).map(Criterion::Email));
        push(search_term(&criteria.notes).map(Criterion::Notes));

        criteria_list
    }

    pub fn matches(&self, record: &CandidateRecord, as_of: DateTime<Utc>) -> bool {
        match self {
            // An empty classification set imposes no constraint.
            Criterion::Classification(requested) => {
                requested.is_empty() || !requested.is_disjoint(&record.expected_classifications)
            }
            Criterion::AppliedClassification(requested) => {
                requested.contains(&record.pool_classification)
            }
            Criterion::Equity(selections) => equity_matches(selections, record),
            Criterion::OperationalRequirements(required) => {
                required.is_subset(&record.accepted_operational_requirements)
            }
            Criterion::Location(regions) => !regions.is_disjoint(&record.location_preferences),
            Criterion::PositionDuration(durations) => {
                !durations.is_disjoint(&record.position_duration)
            }
            Criterion::Skills(required) => {
                let held = record.skill_set();
                required.iter().all(|skill| held.contains(skill))
            }
            Criterion::LanguageAbility(ability) => record.language.ability == Some(*ability),
            Criterion::GeneralSearch(term) => contains_term(
                &format!("{} {} {}", record.first_name, record.last_name, record.email),
                term,
            ),
            Criterion::Pools(pools) => pools.contains(&record.pool_id),
            Criterion::Expiry(filter) => {
                let today = as_of.date_naive();
                match filter {
                    ExpiryFilter::Active => record.expiry_date.map_or(true, |date| date >= today),
                    ExpiryFilter::Expired => record.expiry_date.is_some_and(|date| date < today),
                    ExpiryFilter::All => true,
                }
            }
            Criterion::Status(statuses) => statuses.contains(&record.status),
            Criterion::PriorityCategory(categories) => {
                categories.contains(&record.priority.category())
            }
            Criterion::Suspended(filter) => match filter {
                SuspendedFilter::Active => record.suspended_at.map_or(true, |at| at >= as_of),
                SuspendedFilter::Suspended => record.suspended_at.is_some_and(|at| at < as_of),
                SuspendedFilter::All => true,
            },
            Criterion::GovEmployee(required) => !required || record.is_gov_employee,
            Criterion::Diploma(required) => !required || record.has_diploma,
            Criterion::Name(term) => contains_term(&record.full_name(), term),
            Criterion::Email(term) => contains_term(&record.email, term),
            Criterion::Notes(term) => record
                .notes
                .as_deref()
                .is_some_and(|notes| contains_term(notes, term)),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Criterion::Classification(_) => "classifications",
            Criterion::AppliedClassification(_) => "applied_classifications",
            Criterion::Equity(_) => "equity",
            Criterion::OperationalRequirements(_) => "operational_requirements",
            Criterion::Location(_) => "location_preferences",
            Criterion::PositionDuration(_) => "position_duration",
            Criterion::Skills(_) => "skills",
            Criterion::LanguageAbility(_) => "language_ability",
            Criterion::GeneralSearch(_) => "general_search",
            Criterion::Pools(_) => "pools",
            Criterion::Expiry(_) => "expiry_status",
            Criterion::Status(_) => "statuses",
            Criterion::PriorityCategory(_) => "priority_categories",
            Criterion::Suspended(_) => "suspended_status",
            Criterion::GovEmployee(_) => "is_gov_employee",
            Criterion::Diploma(_) => "has_diploma",
            Criterion::Name(_) => "name",
            Criterion::Email(_) => "email",
            Criterion::Notes(_) => "notes",
        }
    }
}

fn equity_matches(selections: &EquitySelections, record: &CandidateRecord) -> bool {
    let required = |flag: Option<bool>| flag == Some(true);
    let equity = &record.equity;

    (!required(selections.is_woman) || equity.is_woman)
        && (!required(selections.has_disability) || equity.has_disability)
        && (!required(selections.is_indigenous) || equity.is_indigenous())
        && (!required(selections.is_visible_minority) || equity.is_visible_minority)
}

/// Blank terms behave like an absent criterion.
fn search_term(term: &Option<String>) -> Option<String> {
    term.as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

fn contains_term(haystack: &str, lowered_term: &str) -> bool {
    haystack.to_lowercase().contains(lowered_term)
}
