use crate::infra::{load_candidates, load_weights, parse_as_of, InMemoryCandidateStore};
use chrono::{DateTime, Utc};
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use talent_search::config::{AppConfig, SearchConfig};
use talent_search::error::AppError;
use talent_search::workflows::candidates::{CandidateId, SkillId, WireValue};
use talent_search::workflows::search::{
    default_as_of, CallerIdentity, ExpiryFilter, Page, PageRequest, PoolCriteria,
    PoolCriteriaInput, SearchError, SortClause, SortClauseInput, SortColumn, SortSpec,
    SuspendedFilter, TalentSearchService,
};

type CliService = TalentSearchService<InMemoryCandidateStore>;

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Candidate CSV export (defaults to SEARCH_CANDIDATES_CSV, then the bundled sample)
    #[arg(long)]
    pub(crate) candidates_csv: Option<PathBuf>,
    /// Weight table JSON (defaults to SEARCH_WEIGHTS_PATH, then the built-in weights)
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CriteriaArgs {
    /// Search criteria as inline JSON, e.g. '{"skills":["sql"]}'
    #[arg(long, conflicts_with = "criteria_file")]
    pub(crate) criteria_json: Option<String>,
    /// Path to a JSON file holding the search criteria
    #[arg(long)]
    pub(crate) criteria_file: Option<PathBuf>,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD). Defaults to the current minute.
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    #[command(flatten)]
    pub(crate) criteria: CriteriaArgs,
    /// Sort clause as COLUMN[:ASC|DESC]; repeat to add tie-breakers
    #[arg(long, value_parser = parse_sort_clause)]
    pub(crate) sort: Vec<SortClauseInput>,
    /// Page to return, starting at 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub(crate) page: i64,
    /// Page size (defaults to SEARCH_DEFAULT_PAGE_SIZE)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) page_size: Option<i64>,
    /// Candidate id bookmarked by the caller; repeatable
    #[arg(long)]
    pub(crate) bookmark: Vec<String>,
    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CountArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    #[command(flatten)]
    pub(crate) criteria: CriteriaArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for the demo searches (defaults to the current minute)
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Page size used by the demo searches
    #[arg(long, default_value_t = 5)]
    pub(crate) page_size: i64,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        source,
        criteria,
        sort,
        page,
        page_size,
        bookmark,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(&source, config.search)?;
    let as_of = criteria.as_of.unwrap_or_else(default_as_of);
    let criteria = read_criteria(&criteria)?;

    let page_request = service
        .bounded_page_request(page_size, page)
        .map_err(SearchError::from)?;
    let sort = SortSpec::from_input(sort).map_err(SearchError::from)?;
    let caller = CallerIdentity {
        user_id: None,
        bookmarks: bookmark.into_iter().map(CandidateId).collect(),
    };

    let page = service.search(&criteria, as_of, page_request, &sort, &caller)?;

    if json {
        let rendered = serde_json::to_string_pretty(&page).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_page(&page);
    }
    Ok(())
}

pub(crate) fn run_count(args: CountArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&args.source, config.search)?;
    let as_of = args.criteria.as_of.unwrap_or_else(default_as_of);
    let criteria = read_criteria(&args.criteria)?;

    let total = service.count(&criteria, as_of)?;
    println!("{total}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, page_size } = args;
    let as_of = as_of.unwrap_or_else(default_as_of);

    let records = load_candidates(None)?;
    let store = Arc::new(InMemoryCandidateStore::with_records(records.clone()));
    let service = TalentSearchService::new(
        Arc::clone(&store),
        load_weights(None)?,
        SearchConfig::default(),
    );
    let first_page = PageRequest::new(page_size, 1).map_err(SearchError::from)?;
    let anonymous = CallerIdentity::anonymous();

    println!(
        "Talent search demo ({} sample candidates, as of {})",
        store.len(),
        as_of.to_rfc3339()
    );

    println!("\nUnconstrained pool, ordered by status then priority");
    let unconstrained = PoolCriteria::default();
    let page = service.search(
        &unconstrained,
        as_of,
        first_page,
        &SortSpec::default(),
        &anonymous,
    )?;
    render_page(&page);

    println!("\nCandidates holding both `sql` and `rust`, by last name");
    let skilled = PoolCriteria::default()
        .with_skills([SkillId("sql".to_string()), SkillId("rust".to_string())]);
    let by_last_name = SortSpec::new(vec![SortClause::asc(SortColumn::LastName)]);
    let page = service.search(&skilled, as_of, first_page, &by_last_name, &anonymous)?;
    render_page(&page);

    let active = PoolCriteria::default()
        .with_expiry_status(ExpiryFilter::Active)
        .with_suspended_status(SuspendedFilter::Active);
    println!(
        "\nActive, unsuspended candidates: {}",
        service.count(&active, as_of)?
    );

    if let Some(last) = records.last() {
        println!("\nSame pool for a recruiter who bookmarked {}", last.id);
        let recruiter = CallerIdentity {
            user_id: Some("demo-recruiter".to_string()),
            bookmarks: [last.id.clone()].into_iter().collect(),
        };
        let bookmarked_first = SortSpec::new(vec![SortClause::desc(SortColumn::Bookmarked)]);
        let page = service.search(
            &unconstrained,
            as_of,
            first_page,
            &bookmarked_first,
            &recruiter,
        )?;
        render_page(&page);
    }

    let revision = store
        .replace(records.iter().skip(1).cloned().collect())
        .map_err(SearchError::from)?;
    println!(
        "\nStore revision {revision} drops one record; unconstrained count is now {}",
        service.count(&unconstrained, as_of)?
    );

    if let Some(stats) = service.cache_stats() {
        println!(
            "Match cache: {} hits / {} misses ({:.0}% hit rate)",
            stats.hits,
            stats.misses,
            stats.hit_rate() * 100.0
        );
    }

    Ok(())
}

fn build_service(source: &SourceArgs, config: SearchConfig) -> Result<CliService, AppError> {
    let candidates_path = source
        .candidates_csv
        .as_deref()
        .or(config.candidates_csv.as_deref());
    let weights_path = source.weights.as_deref().or(config.weights_path.as_deref());

    let records = load_candidates(candidates_path)?;
    let weights = load_weights(weights_path)?;
    let store = Arc::new(InMemoryCandidateStore::with_records(records));
    Ok(TalentSearchService::new(store, weights, config))
}

fn read_criteria(args: &CriteriaArgs) -> Result<PoolCriteria, AppError> {
    let input: PoolCriteriaInput = match (&args.criteria_json, &args.criteria_file) {
        (Some(raw), _) => serde_json::from_str(raw)?,
        (None, Some(path)) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        (None, None) => PoolCriteriaInput::default(),
    };
    Ok(PoolCriteria::try_from(input).map_err(SearchError::from)?)
}

fn parse_sort_clause(raw: &str) -> Result<SortClauseInput, String> {
    let (column, order) = match raw.split_once(':') {
        Some((column, order)) => (column, Some(order.trim().to_string())),
        None => (raw, None),
    };
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("'{raw}' does not name a sort column"));
    }
    Ok(SortClauseInput {
        column: column.to_string(),
        order,
    })
}

fn render_page(page: &Page) {
    let info = &page.paginator_info;
    println!(
        "Page {}/{} | showing {} of {} matching candidates",
        info.current_page, info.last_page, info.count, info.total
    );

    let first = info.first_item.unwrap_or(1);
    for (offset, result) in page.data.iter().enumerate() {
        let candidate = &result.candidate;
        let skills = result
            .skill_count
            .map(|count| format!(" | {count} requested skills"))
            .unwrap_or_default();
        println!(
            "  {:>3}. {} {} {} | {} | weights {}/{}{}{}",
            first + offset,
            result.candidate_id,
            candidate.first_name,
            candidate.last_name,
            candidate.status.as_str(),
            result.status_weight,
            result.priority_weight,
            skills,
            if candidate.is_flagged { " | flagged" } else { "" },
        );
    }

    if page.diagnostics.skipped_records > 0 {
        println!(
            "  ({} of {} records could not be evaluated and were skipped)",
            page.diagnostics.skipped_records, page.diagnostics.evaluated_records
        );
    }
}
