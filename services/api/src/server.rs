use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredMailer};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use capwaze_intake::config::AppConfig;
use capwaze_intake::error::AppError;
use capwaze_intake::intake::IntakeHandler;
use capwaze_intake::telemetry;
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

    let mailer = Arc::new(ConfiguredMailer::from_config(&config.mail)?);
    let handler = Arc::new(IntakeHandler::new(
        mailer,
        config.intake.profile.clone(),
        config.mail.sender(),
    ));

    let app = with_intake_routes(handler)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        template = config.intake.profile.name,
        transport = ?config.mail.transport,
        "application intake ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
