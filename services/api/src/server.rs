use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use huntboard::config::AppConfig;
use huntboard::error::AppError;
use huntboard::telemetry;
use huntboard::tracker::{seed, MemoryStore, TrackerState};
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

    let store = Arc::new(MemoryStore::new());
    if config.seed_demo_data {
        let user = seed::demo_data(store.as_ref())?;
        info!(user_id = user.id, "demo fixtures installed");
    }
    let tracker_state = Arc::new(TrackerState::new(store));

    let app = service_routes(tracker_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job-search tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
