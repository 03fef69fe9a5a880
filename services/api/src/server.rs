use crate::cli::ServeArgs;
use crate::infra::{AppState, QuizService};
use crate::routes::with_quiz_routes;
use agent_quiz::config::AppConfig;
use agent_quiz::error::AppError;
use agent_quiz::telemetry::{self, LogOutput};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    if let Some(dataset) = args.dataset.take() {
        config.quiz.dataset_path = dataset;
    }

    telemetry::init(&config.telemetry, LogOutput::Stdout)?;

    let service = Arc::new(QuizService::load(&config.quiz)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_quiz_routes(service.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = service.questions().len(),
        "agent quiz service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
