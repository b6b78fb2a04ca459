use crate::cli::ServeArgs;
use crate::infra::{load_weights, AppState, InMemoryCandidateStore};
use crate::routes::with_search_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_search::config::AppConfig;
use talent_search::error::AppError;
use talent_search::telemetry;
use talent_search::workflows::candidates::CandidateCsvImporter;
use talent_search::workflows::search::TalentSearchService;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.candidates_csv.take() {
        config.search.candidates_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let records = match config.search.candidates_csv.as_deref() {
        Some(path) => CandidateCsvImporter::from_path(path)?,
        None => {
            warn!("SEARCH_CANDIDATES_CSV not set; serving an empty candidate store");
            Vec::new()
        }
    };
    let store = Arc::new(InMemoryCandidateStore::with_records(records));
    let weights = load_weights(config.search.weights_path.as_deref())?;
    info!(
        candidates = store.len(),
        custom_weights = config.search.weights_path.is_some(),
        cache_capacity = config.search.cache_capacity,
        "candidate store loaded"
    );

    let search_service = Arc::new(TalentSearchService::new(
        store,
        weights,
        config.search.clone(),
    ));

    let app = with_search_routes(search_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "talent search service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
