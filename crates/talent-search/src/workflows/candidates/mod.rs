//! Candidate records as read from the applicant store.

pub mod domain;
pub mod experience;
pub mod import;

pub use domain::{
    ArmedForcesStatus, BilingualEvaluation, CandidateId, CandidateRecord, CitizenshipStatus,
    ClaimVerification, Classification, EquityProfile, EstimatedLanguageAbility,
    EvaluatedLanguageAbility, IndigenousCommunity, LanguageAbility, LanguageProfile,
    OperationalRequirement, PoolCandidateStatus, PoolId, PositionDuration, PriorityCategory,
    PriorityClaims, SalaryRange, SkillId, WireValue, WorkRegion,
};
pub use experience::{Experience, ExperiencePeriod};
pub use import::{CandidateCsvImporter, ImportError};
