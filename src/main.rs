use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use axum_prometheus::PrometheusMetricLayer;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use rental_intake::config::AppConfig;
use rental_intake::error::AppError;
use rental_intake::infra::{
    InMemoryApplicationGateway, InMemorySessionStore, StaticPropertyDirectory,
};
use rental_intake::telemetry;
use rental_intake::wizard::{
    wizard_router, DocumentCommand, PersonalPatch, PropertyId, SessionId, SignaturePatch,
    TermsPatch, WizardSessionService,
};
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: Arc<PrometheusHandle>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Rental Intake Service",
    about = "Run the rental application intake wizard service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a scripted wizard session end to end and print each snapshot
    Demo,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => serve(args).await,
        Command::Demo => run_demo(),
    }
}

fn build_service(
    placeholder_photo: &str,
) -> Arc<
    WizardSessionService<InMemorySessionStore, StaticPropertyDirectory, InMemoryApplicationGateway>,
> {
    Arc::new(WizardSessionService::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(StaticPropertyDirectory::seeded()),
        Arc::new(InMemoryApplicationGateway::default()),
        placeholder_photo,
    ))
}

async fn serve(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = build_service(&config.intake.placeholder_photo);

    let app = wizard_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rental intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scripted run against the seeded directory: fill the required fields,
/// skip the optional sections, acknowledge the terms, submit.
fn run_demo() -> Result<(), AppError> {
    let service = build_service("/media/property-placeholder.jpg");

    let started = service.start(PropertyId("prop-001".to_string()))?;
    let session_id = SessionId(started.session_id.0.clone());
    print_snapshot("session started", &started);

    let view = service.advance(&session_id)?;
    print_snapshot("property info confirmed", &view);

    service.update(
        &session_id,
        DocumentCommand::UpdatePersonalInformation(PersonalPatch {
            full_name: Some("Jordan Avery".to_string()),
            email: Some("jordan.avery@example.com".to_string()),
            phone_number: Some("515-555-0142".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 17),
            ..PersonalPatch::default()
        }),
    )?;
    let view = service.advance(&session_id)?;
    print_snapshot("personal info completed", &view);

    // Optional sections: residential history through additional info.
    for _ in 0..5 {
        service.skip(&session_id)?;
    }

    service.update(
        &session_id,
        DocumentCommand::UpdateSignature(SignaturePatch {
            terms_acknowledgment: Some(TermsPatch {
                agree_to_lease_terms: Some(true),
                consent_to_background_credit_checks: Some(true),
                understand_rental_policies: Some(true),
            }),
            ..SignaturePatch::default()
        }),
    )?;
    let view = service.advance(&session_id)?;
    print_snapshot("terms acknowledged", &view);

    let confirmed = service.submit(&session_id)?;
    print_snapshot("application submitted", &confirmed);

    Ok(())
}

fn print_snapshot(stage: &str, view: &rental_intake::wizard::SessionView) {
    let rendered = serde_json::to_string_pretty(view).unwrap_or_else(|_| "<unprintable>".into());
    println!("== {stage}\n{rendered}\n");
}
