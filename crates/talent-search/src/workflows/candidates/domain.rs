use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::experience::Experience;

/// Identifier wrapper for a pool candidate (one applicant in one pool).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for a recruitment pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(pub String);

/// Identifier wrapper for a skill from the skills library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub String);

/// Enumerations exchanged as upper snake case strings with callers and CSV exports.
pub trait WireValue: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse_wire(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str().eq_ignore_ascii_case(needle))
    }
}

/// Occupational group and level, e.g. `IT-02`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub group: String,
    pub level: u8,
}

impl Classification {
    pub fn new(group: impl Into<String>, level: u8) -> Self {
        Self {
            group: group.into(),
            level,
        }
    }

    /// Parses the `GROUP-LEVEL` shorthand used in exports (`IT-02`, `PM-5`).
    pub fn parse(raw: &str) -> Option<Self> {
        let (group, level) = raw.trim().rsplit_once('-')?;
        let group = group.trim();
        if group.is_empty() {
            return None;
        }
        let level = level.trim().parse::<u8>().ok()?;
        Some(Self::new(group.to_ascii_uppercase(), level))
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        !self.group.trim().is_empty() && self.level > 0
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.group, self.level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalRequirement {
    DriversLicense,
    OnCall,
    OvertimeOccasional,
    OvertimeRegular,
    OvertimeScheduled,
    OvertimeShortNotice,
    ShiftWork,
    TransportEquipment,
    Travel,
}

impl WireValue for OperationalRequirement {
    const ALL: &'static [Self] = &[
        Self::DriversLicense,
        Self::OnCall,
        Self::OvertimeOccasional,
        Self::OvertimeRegular,
        Self::OvertimeScheduled,
        Self::OvertimeShortNotice,
        Self::ShiftWork,
        Self::TransportEquipment,
        Self::Travel,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::DriversLicense => "DRIVERS_LICENSE",
            Self::OnCall => "ON_CALL",
            Self::OvertimeOccasional => "OVERTIME_OCCASIONAL",
            Self::OvertimeRegular => "OVERTIME_REGULAR",
            Self::OvertimeScheduled => "OVERTIME_SCHEDULED",
            Self::OvertimeShortNotice => "OVERTIME_SHORT_NOTICE",
            Self::ShiftWork => "SHIFT_WORK",
            Self::TransportEquipment => "TRANSPORT_EQUIPMENT",
            Self::Travel => "TRAVEL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkRegion {
    Atlantic,
    BritishColumbia,
    NationalCapital,
    North,
    Ontario,
    Prairie,
    Quebec,
    Telework,
}

impl WireValue for WorkRegion {
    const ALL: &'static [Self] = &[
        Self::Atlantic,
        Self::BritishColumbia,
        Self::NationalCapital,
        Self::North,
        Self::Ontario,
        Self::Prairie,
        Self::Quebec,
        Self::Telework,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Atlantic => "ATLANTIC",
            Self::BritishColumbia => "BRITISH_COLUMBIA",
            Self::NationalCapital => "NATIONAL_CAPITAL",
            Self::North => "NORTH",
            Self::Ontario => "ONTARIO",
            Self::Prairie => "PRAIRIE",
            Self::Quebec => "QUEBEC",
            Self::Telework => "TELEWORK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionDuration {
    Permanent,
    Temporary,
}

impl WireValue for PositionDuration {
    const ALL: &'static [Self] = &[Self::Permanent, Self::Temporary];

    fn as_str(self) -> &'static str {
        match self {
            Self::Permanent => "PERMANENT",
            Self::Temporary => "TEMPORARY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageAbility {
    Bilingual,
    English,
    French,
}

impl WireValue for LanguageAbility {
    const ALL: &'static [Self] = &[Self::Bilingual, Self::English, Self::French];

    fn as_str(self) -> &'static str {
        match self {
            Self::Bilingual => "BILINGUAL",
            Self::English => "ENGLISH",
            Self::French => "FRENCH",
        }
    }
}

/// Self-assessed second language ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimatedLanguageAbility {
    Beginner,
    Intermediate,
    Advanced,
}

impl WireValue for EstimatedLanguageAbility {
    const ALL: &'static [Self] = &[Self::Beginner, Self::Intermediate, Self::Advanced];

    fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        }
    }
}

/// Second language evaluation result (reading, writing, oral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvaluatedLanguageAbility {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "P")]
    P,
    #[serde(rename = "X")]
    X,
    #[serde(rename = "NOT_ASSESSED")]
    NotAssessed,
}

impl WireValue for EvaluatedLanguageAbility {
    const ALL: &'static [Self] = &[
        Self::A,
        Self::B,
        Self::C,
        Self::E,
        Self::P,
        Self::X,
        Self::NotAssessed,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::E => "E",
            Self::P => "P",
            Self::X => "X",
            Self::NotAssessed => "NOT_ASSESSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BilingualEvaluation {
    CompletedEnglish,
    CompletedFrench,
    NotCompleted,
}

impl WireValue for BilingualEvaluation {
    const ALL: &'static [Self] = &[
        Self::CompletedEnglish,
        Self::CompletedFrench,
        Self::NotCompleted,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::CompletedEnglish => "COMPLETED_ENGLISH",
            Self::CompletedFrench => "COMPLETED_FRENCH",
            Self::NotCompleted => "NOT_COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndigenousCommunity {
    Inuit,
    LegacyIsIndigenous,
    Metis,
    NonStatusFirstNations,
    Other,
    StatusFirstNations,
}

impl WireValue for IndigenousCommunity {
    const ALL: &'static [Self] = &[
        Self::Inuit,
        Self::LegacyIsIndigenous,
        Self::Metis,
        Self::NonStatusFirstNations,
        Self::Other,
        Self::StatusFirstNations,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Inuit => "INUIT",
            Self::LegacyIsIndigenous => "LEGACY_IS_INDIGENOUS",
            Self::Metis => "METIS",
            Self::NonStatusFirstNations => "NON_STATUS_FIRST_NATIONS",
            Self::Other => "OTHER",
            Self::StatusFirstNations => "STATUS_FIRST_NATIONS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalaryRange {
    #[serde(rename = "_50_59K")]
    From50To59K,
    #[serde(rename = "_60_69K")]
    From60To69K,
    #[serde(rename = "_70_79K")]
    From70To79K,
    #[serde(rename = "_80_89K")]
    From80To89K,
    #[serde(rename = "_90_99K")]
    From90To99K,
    #[serde(rename = "_100K_PLUS")]
    From100KPlus,
}

impl WireValue for SalaryRange {
    const ALL: &'static [Self] = &[
        Self::From50To59K,
        Self::From60To69K,
        Self::From70To79K,
        Self::From80To89K,
        Self::From90To99K,
        Self::From100KPlus,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::From50To59K => "_50_59K",
            Self::From60To69K => "_60_69K",
            Self::From70To79K => "_70_79K",
            Self::From80To89K => "_80_89K",
            Self::From90To99K => "_90_99K",
            Self::From100KPlus => "_100K_PLUS",
        }
    }
}

/// Lifecycle status of a candidate within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolCandidateStatus {
    Draft,
    DraftExpired,
    NewApplication,
    ApplicationReview,
    ScreenedIn,
    ScreenedOutApplication,
    ScreenedOutAssessment,
    UnderAssessment,
    QualifiedAvailable,
    QualifiedUnavailable,
    QualifiedWithdrew,
    PlacedCasual,
    PlacedTerm,
    PlacedIndeterminate,
    ScreenedOutNotInterested,
    ScreenedOutNotResponsive,
    Expired,
    Removed,
}

impl WireValue for PoolCandidateStatus {
    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::DraftExpired,
        Self::NewApplication,
        Self::ApplicationReview,
        Self::ScreenedIn,
        Self::ScreenedOutApplication,
        Self::ScreenedOutAssessment,
        Self::UnderAssessment,
        Self::QualifiedAvailable,
        Self::QualifiedUnavailable,
        Self::QualifiedWithdrew,
        Self::PlacedCasual,
        Self::PlacedTerm,
        Self::PlacedIndeterminate,
        Self::ScreenedOutNotInterested,
        Self::ScreenedOutNotResponsive,
        Self::Expired,
        Self::Removed,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::DraftExpired => "DRAFT_EXPIRED",
            Self::NewApplication => "NEW_APPLICATION",
            Self::ApplicationReview => "APPLICATION_REVIEW",
            Self::ScreenedIn => "SCREENED_IN",
            Self::ScreenedOutApplication => "SCREENED_OUT_APPLICATION",
            Self::ScreenedOutAssessment => "SCREENED_OUT_ASSESSMENT",
            Self::UnderAssessment => "UNDER_ASSESSMENT",
            Self::QualifiedAvailable => "QUALIFIED_AVAILABLE",
            Self::QualifiedUnavailable => "QUALIFIED_UNAVAILABLE",
            Self::QualifiedWithdrew => "QUALIFIED_WITHDREW",
            Self::PlacedCasual => "PLACED_CASUAL",
            Self::PlacedTerm => "PLACED_TERM",
            Self::PlacedIndeterminate => "PLACED_INDETERMINATE",
            Self::ScreenedOutNotInterested => "SCREENED_OUT_NOT_INTERESTED",
            Self::ScreenedOutNotResponsive => "SCREENED_OUT_NOT_RESPONSIVE",
            Self::Expired => "EXPIRED",
            Self::Removed => "REMOVED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CitizenshipStatus {
    Citizen,
    PermanentResident,
    Other,
}

impl WireValue for CitizenshipStatus {
    const ALL: &'static [Self] = &[Self::Citizen, Self::PermanentResident, Self::Other];

    fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "CITIZEN",
            Self::PermanentResident => "PERMANENT_RESIDENT",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmedForcesStatus {
    Veteran,
    Member,
    NonCaf,
}

impl WireValue for ArmedForcesStatus {
    const ALL: &'static [Self] = &[Self::Veteran, Self::Member, Self::NonCaf];

    fn as_str(self) -> &'static str {
        match self {
            Self::Veteran => "VETERAN",
            Self::Member => "MEMBER",
            Self::NonCaf => "NON_CAF",
        }
    }
}

/// Outcome of verifying a priority or veteran claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimVerification {
    Accepted,
    Rejected,
    Unverified,
}

impl WireValue for ClaimVerification {
    const ALL: &'static [Self] = &[Self::Accepted, Self::Rejected, Self::Unverified];

    fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Unverified => "UNVERIFIED",
        }
    }
}

/// Statutory hiring priority bucket derived from a candidate's claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityCategory {
    PriorityEntitlement,
    Veteran,
    CitizenOrPermanentResident,
    Other,
}

impl WireValue for PriorityCategory {
    const ALL: &'static [Self] = &[
        Self::PriorityEntitlement,
        Self::Veteran,
        Self::CitizenOrPermanentResident,
        Self::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PriorityEntitlement => "PRIORITY_ENTITLEMENT",
            Self::Veteran => "VETERAN",
            Self::CitizenOrPermanentResident => "CITIZEN_OR_PERMANENT_RESIDENT",
            Self::Other => "OTHER",
        }
    }
}

/// Claims used to place a candidate in a priority category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityClaims {
    pub has_priority_entitlement: bool,
    pub priority_verification: Option<ClaimVerification>,
    pub armed_forces_status: Option<ArmedForcesStatus>,
    pub veteran_verification: Option<ClaimVerification>,
    pub citizenship: Option<CitizenshipStatus>,
}

impl PriorityClaims {
    /// A claim counts unless it has been explicitly rejected.
    pub fn category(&self) -> PriorityCategory {
        let not_rejected = |verification: Option<ClaimVerification>| {
            verification != Some(ClaimVerification::Rejected)
        };

        if self.has_priority_entitlement && not_rejected(self.priority_verification) {
            PriorityCategory::PriorityEntitlement
        } else if self.armed_forces_status == Some(ArmedForcesStatus::Veteran)
            && not_rejected(self.veteran_verification)
        {
            PriorityCategory::Veteran
        } else if matches!(
            self.citizenship,
            Some(CitizenshipStatus::Citizen | CitizenshipStatus::PermanentResident)
        ) {
            PriorityCategory::CitizenOrPermanentResident
        } else {
            PriorityCategory::Other
        }
    }
}

/// Self-declared employment equity information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquityProfile {
    pub is_woman: bool,
    pub has_disability: bool,
    pub is_visible_minority: bool,
    pub indigenous_communities: BTreeSet<IndigenousCommunity>,
}

impl EquityProfile {
    pub fn is_indigenous(&self) -> bool {
        !self.indigenous_communities.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub ability: Option<LanguageAbility>,
    pub comprehension_level: Option<EvaluatedLanguageAbility>,
    pub written_level: Option<EvaluatedLanguageAbility>,
    pub verbal_level: Option<EvaluatedLanguageAbility>,
    pub bilingual_evaluation: Option<BilingualEvaluation>,
    pub estimated_ability: Option<EstimatedLanguageAbility>,
}

/// Stored snapshot of an applicant's candidacy in one pool, as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub pool_id: PoolId,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub notes: Option<String>,
    pub status: PoolCandidateStatus,
    pub pool_classification: Classification,
    #[serde(default)]
    pub expected_classifications: BTreeSet<Classification>,
    #[serde(default)]
    pub equity: EquityProfile,
    #[serde(default)]
    pub language: LanguageProfile,
    #[serde(default)]
    pub accepted_operational_requirements: BTreeSet<OperationalRequirement>,
    #[serde(default)]
    pub location_preferences: BTreeSet<WorkRegion>,
    #[serde(default)]
    pub position_duration: BTreeSet<PositionDuration>,
    #[serde(default)]
    pub skills: BTreeSet<SkillId>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub expected_salary: BTreeSet<SalaryRange>,
    #[serde(default)]
    pub priority: PriorityClaims,
    pub expiry_date: Option<NaiveDate>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_gov_employee: bool,
    #[serde(default)]
    pub has_diploma: bool,
    #[serde(default)]
    pub is_flagged: bool,
}

impl CandidateRecord {
    /// The pool's classification followed by any additional expected classifications.
    pub fn classifications(&self) -> impl Iterator<Item = &Classification> {
        std::iter::once(&self.pool_classification).chain(self.expected_classifications.iter())
    }

    /// Declared skills together with skills demonstrated through experiences.
    pub fn skill_set(&self) -> BTreeSet<&SkillId> {
        self.skills
            .iter()
            .chain(self.experiences.iter().flat_map(Experience::skills))
            .collect()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}
