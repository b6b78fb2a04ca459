//! Pool candidate search: criteria composition, match evaluation, ranking and pagination.
//!
//! Records flow from a [`CandidateSource`] snapshot through the composed filter and the
//! match evaluator (in parallel), then through the ranker and the paginator. Evaluation is
//! pure; the caller-supplied as-of instant is the only notion of time.

pub mod cache;
pub mod criteria;
pub mod evaluation;
pub mod filter;
pub mod pagination;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use cache::{CacheStats, MatchCache};
pub use criteria::{
    ClassificationInput, Criterion, EquitySelections, ExpiryFilter, PoolCriteria,
    PoolCriteriaInput, SuspendedFilter,
};
pub use evaluation::{
    CandidateSummary, MatchEvaluator, MatchResult, RecordError, StandardWeightTable, WeightTable,
    WeightTableError,
};
pub use filter::CompositeFilter;
pub use pagination::{paginate, Page, PageRequest, PaginatorInfo, SearchDiagnostics};
pub use ranking::{
    compare, rank, CallerIdentity, SortClause, SortClauseInput, SortColumn, SortOrder, SortSpec,
};
pub use repository::{CandidateSnapshot, CandidateSource, SourceError};
pub use router::{search_router, CountRequest, SearchRequest};
pub use service::{default_as_of, SearchError, TalentSearchService};
pub use validation::ValidationError;
