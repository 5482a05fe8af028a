//! `dirserver`: browse the host filesystem over HTTP.
//!
//! Usage: `dirserver [CONFIG.json]`. Logging is controlled with `RUST_LOG`
//! and defaults to `info`.

use std::path::PathBuf;

use dirserver_rs::{Browser, Config, HttpServer};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::load(&path).await?
        }
        None => Config::default(),
    };

    let server = HttpServer::new(config.server);
    Browser::new(config.volumes).mount(&server).await;

    // Only a failure to bind the listening socket ends up here
    server.start().await?;

    Ok(())
}
