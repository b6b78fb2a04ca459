use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::SkillId;

/// Career timeline entry attached to an applicant profile.
///
/// Every variant carries the skills it demonstrates so skill matching can
/// aggregate across the whole timeline without inspecting type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Experience {
    Award {
        title: String,
        issued_by: String,
        awarded_on: Option<NaiveDate>,
        #[serde(default)]
        skills: BTreeSet<SkillId>,
    },
    Community {
        title: String,
        organization: String,
        period: ExperiencePeriod,
        #[serde(default)]
        skills: BTreeSet<SkillId>,
    },
    Education {
        institution: String,
        area_of_study: String,
        period: ExperiencePeriod,
        #[serde(default)]
        skills: BTreeSet<SkillId>,
    },
    Personal {
        title: String,
        description: String,
        period: ExperiencePeriod,
        #[serde(default)]
        skills: BTreeSet<SkillId>,
    },
    Work {
        role: String,
        organization: String,
        period: ExperiencePeriod,
        #[serde(default)]
        skills: BTreeSet<SkillId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperiencePeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Experience {
    pub fn skills(&self) -> &BTreeSet<SkillId> {
        match self {
            Experience::Award { skills, .. }
            | Experience::Community { skills, .. }
            | Experience::Education { skills, .. }
            | Experience::Personal { skills, .. }
            | Experience::Work { skills, .. } => skills,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Experience::Award { .. } => "award",
            Experience::Community { .. } => "community",
            Experience::Education { .. } => "education",
            Experience::Personal { .. } => "personal",
            Experience::Work { .. } => "work",
        }
    }
}
