/// Trendboard dashboard server
///
/// Loads the trending-videos CSV once and serves the dashboard over HTTP and
/// WebSocket until terminated.

use log::{error, info};
use std::io;
use std::sync::Arc;
use trendboard::server::run_server;
use trendboard::{Config, Dataset};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("{}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    info!("Loading dataset from {}", config.data_path.display());
    let dataset = Dataset::from_path(&config.data_path).map_err(|e| {
        error!("Failed to load dataset: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    run_server(&config.host, config.port, Arc::new(dataset)).await
}
