// Offline job: raw catalog CSV -> precomputed SQLite catalog
use room_matcher::catalog::build_precomputed_catalog;
use room_matcher::config::load_config;
use room_matcher::storage::CatalogStore;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut store = match CatalogStore::open(&config.data.precomputed_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open {}: {}", config.data.precomputed_path, e);
            return ExitCode::FAILURE;
        }
    };

    match build_precomputed_catalog(&config.data.raw_path, &mut store) {
        Ok(catalog) => {
            info!(
                "Wrote {} rooms to {}",
                catalog.len(),
                config.data.precomputed_path
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Catalog build failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
