use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::cache::{CacheKey, CacheStats, EvaluatedMatches, MatchCache};
use super::criteria::PoolCriteria;
use super::evaluation::{MatchEvaluator, WeightTable};
use super::filter::CompositeFilter;
use super::pagination::{paginate, Page, PageRequest, SearchDiagnostics};
use super::ranking::{rank, CallerIdentity, SortSpec};
use super::repository::{CandidateSource, SourceError};
use super::validation::ValidationError;
use crate::config::SearchConfig;

/// Entry point composing the candidate source, weight table and match cache.
pub struct TalentSearchService<S> {
    source: Arc<S>,
    weights: Arc<dyn WeightTable>,
    config: SearchConfig,
    cache: Option<MatchCache>,
}

impl<S> TalentSearchService<S>
where
    S: CandidateSource + 'static,
{
    pub fn new(source: Arc<S>, weights: Arc<dyn WeightTable>, config: SearchConfig) -> Self {
        let cache = MatchCache::new(config.cache_capacity);
        Self {
            source,
            weights,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(MatchCache::stats)
    }

    /// Page request built from the configured default page size.
    pub fn default_page_request(&self, page: i64) -> Result<PageRequest, ValidationError> {
        let size = i64::try_from(self.config.default_page_size).unwrap_or(i64::MAX);
        PageRequest::new(size, page)
    }

    /// Page request for callers at the request boundary: falls back to the configured
    /// default size and rejects sizes above the configured maximum.
    pub fn bounded_page_request(
        &self,
        page_size: Option<i64>,
        page: i64,
    ) -> Result<PageRequest, ValidationError> {
        match page_size {
            Some(size) => PageRequest::new(size, page)?.within(self.config.max_page_size),
            None => self.default_page_request(page),
        }
    }

    /// Filters, ranks and slices the current snapshot. Any page size is honoured here;
    /// request handlers bound it with [`Self::bounded_page_request`].
    pub fn search(
        &self,
        criteria: &PoolCriteria,
        as_of: DateTime<Utc>,
        request: PageRequest,
        sort: &SortSpec,
        caller: &CallerIdentity,
    ) -> Result<Page, SearchError> {
        let evaluated = self.evaluate(criteria, as_of)?;

        let mut ranked = evaluated.matches.clone();
        rank(&mut ranked, sort, caller);

        let mut page = paginate(ranked, request);
        page.diagnostics = SearchDiagnostics {
            evaluated_records: evaluated.evaluated,
            skipped_records: evaluated.skipped,
        };

        debug!(
            total = page.paginator_info.total,
            page = page.paginator_info.current_page,
            skipped = evaluated.skipped,
            "candidate search completed"
        );
        Ok(page)
    }

    /// Number of matching candidates; always equals `search(..).paginator_info.total`.
    pub fn count(&self, criteria: &PoolCriteria, as_of: DateTime<Utc>) -> Result<usize, SearchError> {
        Ok(self.evaluate(criteria, as_of)?.matches.len())
    }

    fn evaluate(
        &self,
        criteria: &PoolCriteria,
        as_of: DateTime<Utc>,
    ) -> Result<Arc<EvaluatedMatches>, SearchError> {
        let snapshot = self.source.snapshot()?;
        let key = CacheKey {
            criteria: criteria.clone(),
            as_of,
            revision: snapshot.revision,
        };

        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            return Ok(hit);
        }

        let filter = CompositeFilter::compose(criteria);
        let evaluator = MatchEvaluator::new(self.weights.as_ref());

        let outcomes: Vec<_> = snapshot
            .records
            .par_iter()
            .map(|record| evaluator.evaluate(record, &filter, as_of))
            .collect();

        let mut evaluated = EvaluatedMatches {
            matches: Vec::new(),
            evaluated: outcomes.len(),
            skipped: 0,
        };
        for outcome in outcomes {
            match outcome {
                Ok(result) if result.matched => evaluated.matches.push(result),
                Ok(_) => {}
                Err(error) => {
                    warn!(%error, "skipping candidate record that cannot be evaluated");
                    evaluated.skipped += 1;
                }
            }
        }

        let evaluated = Arc::new(evaluated);
        if let Some(cache) = &self.cache {
            cache.put(key, Arc::clone(&evaluated));
        }
        Ok(evaluated)
    }
}

/// Evaluation instant used when a request names none: the current minute, so repeated
/// requests share match cache entries.
pub fn default_as_of() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_second(0)
        .and_then(|instant| instant.with_nanosecond(0))
        .unwrap_or(now)
}

/// Error raised by the search service.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
