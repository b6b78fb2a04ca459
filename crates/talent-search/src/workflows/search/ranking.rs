//! Deterministic ordering of match results.
//!
//! Status weight and priority weight always lead, caller clauses follow, and the
//! candidate id breaks any remaining tie so equal inputs always rank identically.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::evaluation::MatchResult;
use super::validation::ValidationError;
use crate::workflows::candidates::{CandidateId, WireValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl WireValue for SortOrder {
    const ALL: &'static [Self] = &[Self::Asc, Self::Desc];

    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortColumn {
    FirstName,
    LastName,
    Email,
    SubmittedAt,
    ExpiryDate,
    SkillCount,
    Flagged,
    Bookmarked,
}

impl WireValue for SortColumn {
    const ALL: &'static [Self] = &[
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::SubmittedAt,
        Self::ExpiryDate,
        Self::SkillCount,
        Self::Flagged,
        Self::Bookmarked,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "FIRST_NAME",
            Self::LastName => "LAST_NAME",
            Self::Email => "EMAIL",
            Self::SubmittedAt => "SUBMITTED_AT",
            Self::ExpiryDate => "EXPIRY_DATE",
            Self::SkillCount => "SKILL_COUNT",
            Self::Flagged => "FLAGGED",
            Self::Bookmarked => "BOOKMARKED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortClause {
    pub column: SortColumn,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortClause {
    pub fn asc(column: SortColumn) -> Self {
        Self {
            column,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(column: SortColumn) -> Self {
        Self {
            column,
            order: SortOrder::Desc,
        }
    }
}

/// Caller-supplied sort clauses, applied after the weight keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub clauses: Vec<SortClause>,
}

impl SortSpec {
    pub fn new(clauses: Vec<SortClause>) -> Self {
        Self { clauses }
    }

    pub fn from_input(inputs: Vec<SortClauseInput>) -> Result<Self, ValidationError> {
        inputs
            .into_iter()
            .map(SortClause::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

/// Sort clause as received from callers; unknown columns or orders fail the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortClauseInput {
    pub column: String,
    #[serde(default)]
    pub order: Option<String>,
}

impl TryFrom<SortClauseInput> for SortClause {
    type Error = ValidationError;

    fn try_from(input: SortClauseInput) -> Result<Self, Self::Error> {
        let column =
            SortColumn::parse_wire(&input.column).ok_or(ValidationError::UnknownValue {
                field: "order_by.column",
                value: input.column.clone(),
            })?;
        let order = match input.order {
            None => SortOrder::Asc,
            Some(raw) => SortOrder::parse_wire(&raw).ok_or(ValidationError::UnknownValue {
                field: "order_by.order",
                value: raw,
            })?,
        };
        Ok(SortClause { column, order })
    }
}

/// Who is asking; bookmarks only affect ordering for this caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallerIdentity {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bookmarks: BTreeSet<CandidateId>,
}

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_bookmarked(&self, id: &CandidateId) -> bool {
        self.bookmarks.contains(id)
    }
}

pub fn rank(results: &mut [MatchResult], spec: &SortSpec, caller: &CallerIdentity) {
    results.sort_by(|left, right| compare(left, right, spec, caller));
}

pub fn compare(
    left: &MatchResult,
    right: &MatchResult,
    spec: &SortSpec,
    caller: &CallerIdentity,
) -> Ordering {
    left.status_weight
        .cmp(&right.status_weight)
        .then_with(|| left.priority_weight.cmp(&right.priority_weight))
        .then_with(|| {
            spec.clauses
                .iter()
                .map(|clause| clause.order.apply(compare_column(clause.column, left, right, caller)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| left.candidate_id.cmp(&right.candidate_id))
}

/// Ascending comparison with missing values greatest, so ASC puts them last and DESC first.
fn compare_column(
    column: SortColumn,
    left: &MatchResult,
    right: &MatchResult,
    caller: &CallerIdentity,
) -> Ordering {
    let (l, r) = (&left.candidate, &right.candidate);
    match column {
        SortColumn::FirstName => nulls_greatest(text_key(&l.first_name), text_key(&r.first_name)),
        SortColumn::LastName => nulls_greatest(text_key(&l.last_name), text_key(&r.last_name)),
        SortColumn::Email => nulls_greatest(text_key(&l.email), text_key(&r.email)),
        SortColumn::SubmittedAt => nulls_greatest(l.submitted_at, r.submitted_at),
        SortColumn::ExpiryDate => nulls_greatest(l.expiry_date, r.expiry_date),
        SortColumn::SkillCount => nulls_greatest(left.skill_count, right.skill_count),
        SortColumn::Flagged => l.is_flagged.cmp(&r.is_flagged),
        SortColumn::Bookmarked => caller
            .has_bookmarked(&left.candidate_id)
            .cmp(&caller.has_bookmarked(&right.candidate_id)),
    }
}

fn text_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn nulls_greatest<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}
