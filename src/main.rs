use room_matcher::api::{AppState, router};
use room_matcher::catalog::{Catalog, load_or_build};
use room_matcher::config::{AppConfig, load_config};
use room_matcher::model::CatalogError;
use room_matcher::storage::CatalogStore;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Malformed catalogs are fatal: the builder/loader produced an incompatible table.
    let catalog = match prepare_catalog(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Catalog loaded: {} rooms across {} hotels",
        catalog.len(),
        catalog.hotel_count()
    );

    let state = Arc::new(AppState::new(config.clone(), catalog));
    let app = router(state);

    let addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Room matcher listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn prepare_catalog(config: &AppConfig) -> Result<Catalog, CatalogError> {
    let mut store = CatalogStore::open(&config.data.precomputed_path)?;
    load_or_build(&config.data.raw_path, &mut store)
}
