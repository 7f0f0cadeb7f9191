//! Task Store
//!
//! Serves the task CRUD API over HTTP, persisting tasks in SQLite.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use task_store::api;
use task_store::cli::{Cli, Command};
use task_store::config::{Config, ConfigLoader};
use task_store::db::Database;
use task_store::logging;
use task_store::service::TaskService;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log, cli.verbose)?;

    let loader = match &cli.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => ConfigLoader::load()?,
    };
    for (tier, path) in loader.sources() {
        info!("Config ({}): {}", tier, path.display());
    }
    let mut config = loader.into_config();
    apply_cli_overrides(&mut config, &cli);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config, cli.in_memory).await,
        Command::InitDb => init_db(&config),
    }
}

/// CLI flags take precedence over every config tier.
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(db_path) = &cli.database {
        config.server.db_path = db_path.into();
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
}

fn open_database(config: &Config, in_memory: bool) -> Result<Database> {
    if in_memory {
        warn!("Using in-memory database; tasks are lost on exit");
        return Database::open_in_memory();
    }
    config.ensure_db_dir()?;
    info!("Database: {:?}", config.server.db_path);
    Database::open(&config.server.db_path)
}

fn init_db(config: &Config) -> Result<()> {
    let db = open_database(config, false)?;
    let count = db.count_tasks()?;
    info!(
        "Database ready at {:?} ({} tasks)",
        config.server.db_path, count
    );
    Ok(())
}

async fn run_server(config: Config, in_memory: bool) -> Result<()> {
    info!("Starting Task Store v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.listen_addr()?;
    let db = open_database(&config, in_memory)?;
    info!("Database initialized successfully");

    let service = TaskService::new(Arc::new(db));
    api::serve(service, addr, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
