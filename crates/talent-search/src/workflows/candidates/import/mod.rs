//! Candidate CSV import used to seed the in-memory store for the CLI and demo server.

mod parser;

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use super::domain::{
    CandidateId, CandidateRecord, Classification, EquityProfile, LanguageProfile, PoolId,
    PriorityClaims, SkillId, WireValue,
};
use parser::{parse_date, parse_datetime, parse_flag, split_list, CandidateRow, LocatedRow};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read candidate export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid candidate CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing required column `{field}`")]
    MissingField { line: u64, field: &'static str },
    #[error("line {line}: unrecognized value `{value}` for `{field}`")]
    InvalidValue {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: duplicate candidate id `{id}`")]
    DuplicateId { line: u64, id: String },
}

pub struct CandidateCsvImporter;

impl CandidateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows are validated eagerly; the first bad cell aborts the import.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, ImportError> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for located in parser::parse_rows(reader)? {
            let line = located.line;
            let record = map_row(located)?;
            if !seen.insert(record.id.clone()) {
                return Err(ImportError::DuplicateId {
                    line,
                    id: record.id.0,
                });
            }
            records.push(record);
        }

        Ok(records)
    }
}

struct RowMapper {
    line: u64,
}

impl RowMapper {
    fn required(&self, field: &'static str, value: Option<String>) -> Result<String, ImportError> {
        value.ok_or(ImportError::MissingField {
            line: self.line,
            field,
        })
    }

    fn invalid(&self, field: &'static str, value: &str) -> ImportError {
        ImportError::InvalidValue {
            line: self.line,
            field,
            value: value.to_string(),
        }
    }

    fn wire<T: WireValue>(
        &self,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<Option<T>, ImportError> {
        value
            .map(|raw| T::parse_wire(raw).ok_or_else(|| self.invalid(field, raw)))
            .transpose()
    }

    fn wire_set<T: WireValue + Ord>(
        &self,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<BTreeSet<T>, ImportError> {
        let mut set = BTreeSet::new();
        for raw in value.map(split_list).into_iter().flatten() {
            set.insert(T::parse_wire(raw).ok_or_else(|| self.invalid(field, raw))?);
        }
        Ok(set)
    }

    fn flag(&self, field: &'static str, value: Option<&str>) -> Result<bool, ImportError> {
        match value {
            None => Ok(false),
            Some(raw) => parse_flag(raw).ok_or_else(|| self.invalid(field, raw)),
        }
    }

    fn classification(&self, field: &'static str, raw: &str) -> Result<Classification, ImportError> {
        Classification::parse(raw).ok_or_else(|| self.invalid(field, raw))
    }
}

fn map_row(located: LocatedRow) -> Result<CandidateRecord, ImportError> {
    let mapper = RowMapper { line: located.line };
    let row: CandidateRow = located.row;

    let status_raw = mapper.required("status", row.status.clone())?;
    let status = mapper
        .wire("status", Some(status_raw.as_str()))?
        .ok_or_else(|| mapper.invalid("status", &status_raw))?;

    let pool_classification_raw =
        mapper.required("pool_classification", row.pool_classification.clone())?;
    let pool_classification =
        mapper.classification("pool_classification", &pool_classification_raw)?;

    let mut expected_classifications = BTreeSet::new();
    for raw in row.expected_classifications.as_deref().map(split_list).into_iter().flatten() {
        expected_classifications.insert(mapper.classification("expected_classifications", raw)?);
    }

    let equity = EquityProfile {
        is_woman: mapper.flag("is_woman", row.is_woman.as_deref())?,
        has_disability: mapper.flag("has_disability", row.has_disability.as_deref())?,
        is_visible_minority: mapper
            .flag("is_visible_minority", row.is_visible_minority.as_deref())?,
        indigenous_communities: mapper
            .wire_set("indigenous_communities", row.indigenous_communities.as_deref())?,
    };

    let language = LanguageProfile {
        ability: mapper.wire("language_ability", row.language_ability.as_deref())?,
        comprehension_level: mapper
            .wire("comprehension_level", row.comprehension_level.as_deref())?,
        written_level: mapper.wire("written_level", row.written_level.as_deref())?,
        verbal_level: mapper.wire("verbal_level", row.verbal_level.as_deref())?,
        bilingual_evaluation: mapper
            .wire("bilingual_evaluation", row.bilingual_evaluation.as_deref())?,
        estimated_ability: mapper.wire(
            "estimated_language_ability",
            row.estimated_language_ability.as_deref(),
        )?,
    };

    let priority = PriorityClaims {
        has_priority_entitlement: mapper
            .flag("has_priority_entitlement", row.has_priority_entitlement.as_deref())?,
        priority_verification: mapper
            .wire("priority_verification", row.priority_verification.as_deref())?,
        armed_forces_status: mapper
            .wire("armed_forces_status", row.armed_forces_status.as_deref())?,
        veteran_verification: mapper
            .wire("veteran_verification", row.veteran_verification.as_deref())?,
        citizenship: mapper.wire("citizenship", row.citizenship.as_deref())?,
    };

    let expiry_date = row
        .expiry_date
        .as_deref()
        .map(|raw| parse_date(raw).ok_or_else(|| mapper.invalid("expiry_date", raw)))
        .transpose()?;
    let suspended_at = row
        .suspended_at
        .as_deref()
        .map(|raw| parse_datetime(raw).ok_or_else(|| mapper.invalid("suspended_at", raw)))
        .transpose()?;
    let submitted_at = row
        .submitted_at
        .as_deref()
        .map(|raw| parse_datetime(raw).ok_or_else(|| mapper.invalid("submitted_at", raw)))
        .transpose()?;

    let skills = row
        .skills
        .as_deref()
        .map(split_list)
        .into_iter()
        .flatten()
        .map(|skill| SkillId(skill.to_string()))
        .collect();

    Ok(CandidateRecord {
        id: CandidateId(mapper.required("id", row.id)?),
        pool_id: PoolId(mapper.required("pool_id", row.pool_id)?),
        user_id: row.user_id.unwrap_or_default(),
        first_name: row.first_name.unwrap_or_default(),
        last_name: row.last_name.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        notes: row.notes,
        status,
        pool_classification,
        expected_classifications,
        equity,
        language,
        accepted_operational_requirements: mapper
            .wire_set("operational_requirements", row.operational_requirements.as_deref())?,
        location_preferences: mapper
            .wire_set("location_preferences", row.location_preferences.as_deref())?,
        position_duration: mapper.wire_set("position_duration", row.position_duration.as_deref())?,
        skills,
        experiences: Vec::new(),
        expected_salary: mapper.wire_set("expected_salary", row.expected_salary.as_deref())?,
        priority,
        expiry_date,
        suspended_at,
        submitted_at,
        is_gov_employee: mapper.flag("is_gov_employee", row.is_gov_employee.as_deref())?,
        has_diploma: mapper.flag("has_diploma", row.has_diploma.as_deref())?,
        is_flagged: mapper.flag("is_flagged", row.is_flagged.as_deref())?,
    })
}
