//! Process entry-point: wires configuration, persistence, and the GraphQL
//! server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tracker_backend::domain::AppService;
use tracker_backend::outbound::persistence::MongoStore;
use tracker_backend::server::{self, Settings};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "tracker-backend", about = "GraphQL backend for the project tracker")]
struct Cli {
    /// Path to the JSON settings file.
    #[arg(long, default_value = "config/settings.json")]
    config: PathBuf,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = Settings::from_file(&cli.config).map_err(std::io::Error::other)?;

    let store = MongoStore::connect(&settings.db().store_config())
        .await
        .map_err(std::io::Error::other)?;
    store
        .ensure_indexes()
        .await
        .map_err(std::io::Error::other)?;
    let store = Arc::new(store);

    let service = Arc::new(AppService::new(store.clone(), store.clone(), store));

    info!(
        port = settings.webserver().http_port(),
        db = settings.db().dbname(),
        "starting tracker backend"
    );
    server::run(&settings, service).await
}
