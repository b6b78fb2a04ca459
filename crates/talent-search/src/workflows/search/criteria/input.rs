use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{EquitySelections, ExpiryFilter, PoolCriteria, SuspendedFilter};
use crate::workflows::candidates::{Classification, PoolId, SkillId, WireValue};
use crate::workflows::search::validation::ValidationError;

/// Loosely typed criteria as received from HTTP or CLI callers.
///
/// Enumerations arrive as strings and classifications with a signed level, so
/// conversion into [`PoolCriteria`] is where unknown values are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolCriteriaInput {
    #[serde(default)]
    pub classifications: Option<Vec<ClassificationInput>>,
    #[serde(default)]
    pub applied_classifications: Option<Vec<ClassificationInput>>,
    #[serde(default)]
    pub equity: Option<EquitySelections>,
    #[serde(default)]
    pub operational_requirements: Option<Vec<String>>,
    #[serde(default)]
    pub location_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub position_duration: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub language_ability: Option<String>,
    #[serde(default)]
    pub general_search: Option<String>,
    #[serde(default)]
    pub pools: Option<Vec<String>>,
    #[serde(default)]
    pub expiry_status: Option<String>,
    #[serde(default)]
    pub statuses: Option<Vec<String>>,
    #[serde(default)]
    pub priority_categories: Option<Vec<String>>,
    #[serde(default)]
    pub suspended_status: Option<String>,
    #[serde(default)]
    pub is_gov_employee: Option<bool>,
    #[serde(default)]
    pub has_diploma: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationInput {
    pub group: String,
    pub level: i64,
}

impl ClassificationInput {
    fn validate(&self, field: &'static str) -> Result<Classification, ValidationError> {
        let malformed = || ValidationError::MalformedClassification {
            field,
            value: format!("{}-{}", self.group, self.level),
        };

        let group = self.group.trim();
        if group.is_empty() {
            return Err(malformed());
        }
        let level = u8::try_from(self.level)
            .ok()
            .filter(|level| *level > 0)
            .ok_or_else(malformed)?;

        Ok(Classification::new(group.to_ascii_uppercase(), level))
    }
}

fn wire<T: WireValue>(field: &'static str, raw: Option<String>) -> Result<Option<T>, ValidationError> {
    raw.map(|value| {
        T::parse_wire(&value).ok_or(ValidationError::UnknownValue { field, value })
    })
    .transpose()
}

fn wire_set<T: WireValue + Ord>(
    field: &'static str,
    raw: Option<Vec<String>>,
) -> Result<Option<BTreeSet<T>>, ValidationError> {
    raw.map(|values| {
        values
            .into_iter()
            .map(|value| {
                T::parse_wire(&value).ok_or(ValidationError::UnknownValue { field, value })
            })
            .collect()
    })
    .transpose()
}

fn classification_set(
    field: &'static str,
    raw: Option<Vec<ClassificationInput>>,
) -> Result<Option<BTreeSet<Classification>>, ValidationError> {
    raw.map(|values| {
        values
            .iter()
            .map(|value| value.validate(field))
            .collect::<Result<BTreeSet<_>, _>>()
    })
    .transpose()
}

/// Blank ids are rejected rather than dropped, so they never turn into an empty set.
fn id_set<T: Ord>(
    field: &'static str,
    raw: Option<Vec<String>>,
    wrap: fn(String) -> T,
) -> Result<Option<BTreeSet<T>>, ValidationError> {
    raw.map(|values| {
        values
            .into_iter()
            .map(|value| match value.trim() {
                "" => Err(ValidationError::BlankValue { field }),
                trimmed => Ok(wrap(trimmed.to_string())),
            })
            .collect()
    })
    .transpose()
}

impl TryFrom<PoolCriteriaInput> for PoolCriteria {
    type Error = ValidationError;

    fn try_from(input: PoolCriteriaInput) -> Result<Self, Self::Error> {
        Ok(PoolCriteria {
            classifications: classification_set("classifications", input.classifications)?,
            applied_classifications: classification_set(
                "applied_classifications",
                input.applied_classifications,
            )?,
            equity: input.equity,
            operational_requirements: wire_set(
                "operational_requirements",
                input.operational_requirements,
            )?,
            location_preferences: wire_set("location_preferences", input.location_preferences)?,
            position_duration: wire_set("position_duration", input.position_duration)?,
            skills: id_set("skills", input.skills, SkillId)?,
            language_ability: wire("language_ability", input.language_ability)?,
            general_search: input.general_search,
            pools: id_set("pools", input.pools, PoolId)?,
            expiry_status: wire::<ExpiryFilter>("expiry_status", input.expiry_status)?,
            statuses: wire_set("statuses", input.statuses)?,
            priority_categories: wire_set("priority_categories", input.priority_categories)?,
            suspended_status: wire::<SuspendedFilter>("suspended_status", input.suspended_status)?,
            is_gov_employee: input.is_gov_employee,
            has_diploma: input.has_diploma,
            name: input.name,
            email: input.email,
            notes: input.notes,
        })
    }
}
