use crate::cli::ServeArgs;
use crate::infra::{default_scoring_config, AppState, InMemoryDelayRepository};
use crate::routes::with_delay_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use excuse_ai::config::AppConfig;
use excuse_ai::error::AppError;
use excuse_ai::telemetry;
use excuse_ai::workflows::delays::{DelayReviewService, NullSignalProvider};

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

    let repository = Arc::new(InMemoryDelayRepository::default());
    // No analysis backend is wired in this build; the null provider keeps
    // the external contribution at its neutral value.
    let signal = Arc::new(NullSignalProvider);
    let review_service = Arc::new(DelayReviewService::new(
        repository,
        signal,
        default_scoring_config(),
    ));

    let app = with_delay_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "delay review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
