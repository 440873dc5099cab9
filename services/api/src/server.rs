use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_compensation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recovery_ops::config::AppConfig;
use recovery_ops::error::AppError;
use recovery_ops::telemetry;
use recovery_ops::workflows::compensation::CompensationEngine;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let rate_table = config.compensation.rate_table()?;
    info!(
        rules = rate_table.rules().len(),
        source = config
            .compensation
            .rate_table_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "standard".to_string()),
        "rate table loaded"
    );
    let engine = Arc::new(CompensationEngine::new(rate_table));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_compensation_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "recovery compensation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
