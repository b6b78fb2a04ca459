use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw CSV row; every cell stays textual until the mapping step validates it.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidateRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) pool_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) user_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) last_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) notes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) pool_classification: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) expected_classifications: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) is_woman: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) has_disability: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) is_visible_minority: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) indigenous_communities: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) language_ability: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) comprehension_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) written_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) verbal_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) bilingual_evaluation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) estimated_language_ability: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) operational_requirements: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) location_preferences: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) position_duration: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) skills: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) expected_salary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) has_priority_entitlement: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) priority_verification: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) armed_forces_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) veteran_verification: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) citizenship: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) expiry_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) suspended_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) submitted_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) is_gov_employee: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) has_diploma: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) is_flagged: Option<String>,
}

/// Parsed row tagged with its 1-based line in the source file.
#[derive(Debug)]
pub(crate) struct LocatedRow {
    pub(crate) line: u64,
    pub(crate) row: CandidateRow,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<LocatedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: CandidateRow = record.deserialize(Some(&headers))?;
        rows.push(LocatedRow { line, row });
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Splits a multi-valued cell. Exports use `;` but `|` shows up in older files.
pub(crate) fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split([';', '|'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    parse_datetime(trimmed).map(|dt| dt.date_naive())
}

pub(crate) fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}
