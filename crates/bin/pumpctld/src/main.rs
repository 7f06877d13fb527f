//! # pumpctld: pump controller daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct store implementations (adapters)
//! - Construct application services, injecting stores via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use pumpctl_adapter_http_axum::state::AppState;
use pumpctl_adapter_storage_sqlite_sqlx::Config as DatabaseConfig;
use pumpctl_app::clock::SystemClock;
use pumpctl_app::services::control_mutator::ControlMutator;
use pumpctl_app::services::decision_evaluator::DecisionEvaluator;
use pumpctl_app::services::schedule_service::ScheduleService;
use pumpctl_app::services::sensor_service::SensorReportService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let offset = config.utc_offset()?;
    let timeout = config.storage_timeout();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;

    // Stores
    let control_store = db.control_store();
    let schedule_repo = db.schedule_repository();
    let sensor_log = db.sensor_log();
    let clock = SystemClock::with_offset(offset);

    // Services
    let evaluator =
        DecisionEvaluator::new(control_store.clone(), schedule_repo.clone()).with_timeout(timeout);
    let sensor_service =
        SensorReportService::new(evaluator, sensor_log, clock).with_timeout(timeout);
    let control_mutator = ControlMutator::new(control_store, clock).with_timeout(timeout);
    let schedule_service = ScheduleService::new(schedule_repo, clock).with_timeout(timeout);

    // HTTP
    let state = AppState::new(sensor_service, control_mutator, schedule_service)
        .with_utc_offset(offset);
    let app = pumpctl_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, utc_offset = %offset, "pumpctld listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pumpctld stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
