use crate::cli::ServeArgs;
use crate::infra::{load_directory, AppState, InMemoryListingRepository};
use crate::routes::with_marketplace_routes;
use crate::sample;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use unistay::config::{AppConfig, AppEnvironment};
use unistay::error::AppError;
use unistay::marketplace::{ListingRepository, MarketplaceService};
use unistay::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(load_directory(&config.search)?);
    let repository = Arc::new(InMemoryListingRepository::default());

    if config.environment == AppEnvironment::Development {
        let listings =
            sample::seed_listings(&directory, config.search.nearby_radius_miles, Utc::now());
        let seeded = listings.len();
        for listing in listings {
            repository.insert(listing)?;
        }
        info!(seeded, "seeded development listings");
    }

    let service = Arc::new(MarketplaceService::new(
        repository,
        directory,
        config.search.recommendation_limit,
    ));

    let app = with_marketplace_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "unistay marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
