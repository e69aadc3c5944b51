//! Verifies that a `TaskBridge` deployment is wired correctly.
//!
//! Usage:
//!
//! ```text
//! taskbridge_check [config-path]
//! ```
//!
//! Loads configuration (file plus `TASKBRIDGE_*` overrides), installs
//! logging, opens the `PostgreSQL` pool and runs a round-trip query, then
//! builds the GitHub client. Exits non-zero on the first failure.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::path::PathBuf;
use std::process::ExitCode;
use taskbridge::{
    config::AppConfig,
    task::adapters::{github::GithubIssueClient, postgres::PostgresTaskStore},
    telemetry::init_tracing,
};
use tracing::{error, info};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            report_startup_error(&err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging) {
        report_startup_error(&err);
        return ExitCode::FAILURE;
    }

    match run(&config).await {
        Ok(()) => {
            info!("all checks passed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "check failed");
            ExitCode::FAILURE
        }
    }
}

#[expect(clippy::print_stderr, reason = "tracing is not initialised yet")]
fn report_startup_error(err: &dyn std::fmt::Display) {
    eprintln!("taskbridge_check: {err}");
}

async fn run(config: &AppConfig) -> Result<(), BoxError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database.url.clone());
    let pool = Pool::builder()
        .max_size(config.database.max_connections)
        .build(manager)?;
    let store = PostgresTaskStore::new(pool);

    let probe_pool = store.pool().clone();
    tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        let mut connection = probe_pool.get()?;
        diesel::sql_query("SELECT 1").execute(&mut connection)?;
        Ok(())
    })
    .await??;
    info!(max_connections = config.database.max_connections, "database reachable");

    GithubIssueClient::new(&config.github)?;
    info!(api_url = %config.github.api_url, "GitHub client configured");
    Ok(())
}
