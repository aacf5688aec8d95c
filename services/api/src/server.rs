use crate::cli::ServeArgs;
use crate::infra::{sample_catalog, AppState, StaticCatalogProvider};
use crate::routes::with_gateway_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Duration;
use directory_hub::catalog::DirectoryRegistry;
use directory_hub::config::AppConfig;
use directory_hub::error::AppError;
use directory_hub::routing::DirectoryGateway;
use directory_hub::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let provider = match &config.catalog.file {
        Some(path) => StaticCatalogProvider::from_file(path)?,
        None => StaticCatalogProvider::new(sample_catalog()),
    };
    let registry = Arc::new(DirectoryRegistry::with_ttl(
        provider,
        Duration::seconds(config.catalog.ttl_seconds),
    ));
    let gateway = Arc::new(DirectoryGateway::new(registry, config.routing.clone()));

    let app = with_gateway_routes(gateway)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ?config.routing.primary_mode,
        "directory publisher ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
