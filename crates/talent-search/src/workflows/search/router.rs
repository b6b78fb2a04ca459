use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::criteria::{PoolCriteria, PoolCriteriaInput};
use super::pagination::{Page, PageRequest};
use super::ranking::{CallerIdentity, SortClauseInput, SortSpec};
use super::repository::CandidateSource;
use super::service::{default_as_of, SearchError, TalentSearchService};
use super::validation::ValidationError;
use crate::error::AppError;

/// Body of `POST /api/v1/pool-candidates/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    #[serde(default)]
    pub criteria: PoolCriteriaInput,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub order_by: Vec<SortClauseInput>,
    #[serde(default)]
    pub caller: CallerIdentity,
}

/// Body of `POST /api/v1/pool-candidates/count`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountRequest {
    #[serde(default)]
    pub criteria: PoolCriteriaInput,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

pub fn search_router<S>(service: Arc<TalentSearchService<S>>) -> Router
where
    S: CandidateSource + 'static,
{
    Router::new()
        .route("/api/v1/pool-candidates/search", post(search_handler::<S>))
        .route("/api/v1/pool-candidates/count", post(count_handler::<S>))
        .with_state(service)
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<TalentSearchService<S>>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Page>, AppError>
where
    S: CandidateSource + 'static,
{
    let Json(request) = payload?;
    let as_of = request.as_of.unwrap_or_else(default_as_of);
    let (criteria, page_request, sort, caller) =
        parse_search(&*service, request).map_err(SearchError::from)?;

    let page = service.search(&criteria, as_of, page_request, &sort, &caller)?;
    Ok(Json(page))
}

pub(crate) async fn count_handler<S>(
    State(service): State<Arc<TalentSearchService<S>>>,
    payload: Result<Json<CountRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError>
where
    S: CandidateSource + 'static,
{
    let Json(request) = payload?;
    let as_of = request.as_of.unwrap_or_else(default_as_of);
    let criteria = PoolCriteria::try_from(request.criteria).map_err(SearchError::from)?;

    let total = service.count(&criteria, as_of)?;
    Ok(Json(json!({ "total": total })))
}

fn parse_search<S>(
    service: &TalentSearchService<S>,
    request: SearchRequest,
) -> Result<(PoolCriteria, PageRequest, SortSpec, CallerIdentity), ValidationError>
where
    S: CandidateSource + 'static,
{
    let criteria = PoolCriteria::try_from(request.criteria)?;
    let page = request.page.unwrap_or(1);
    let page_request = service.bounded_page_request(request.page_size, page)?;
    let sort = SortSpec::from_input(request.order_by)?;
    Ok((criteria, page_request, sort, request.caller))
}
