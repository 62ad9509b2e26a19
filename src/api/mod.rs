pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use axum::Router;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone)]
struct LoadedCatalog {
    catalog: Arc<Catalog>,
    loaded_at: DateTime<Utc>,
}

/// Shared service state. The catalog is swapped as a whole, never edited.
pub struct AppState {
    pub config: Arc<AppConfig>,
    current: RwLock<LoadedCatalog>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, catalog: Catalog) -> Self {
        Self {
            config,
            current: RwLock::new(LoadedCatalog {
                catalog: Arc::new(catalog),
                loaded_at: Utc::now(),
            }),
        }
    }

    fn loaded(&self) -> LoadedCatalog {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The catalog a request should use from start to finish.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.loaded().catalog
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded().loaded_at
    }

    pub fn replace_catalog(&self, catalog: Catalog) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = LoadedCatalog {
            catalog: Arc::new(catalog),
            loaded_at: Utc::now(),
        };
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/match", post(handlers::match_room))
        .route("/health", get(handlers::health_check))
        .route("/catalog/reload", post(handlers::reload_catalog))
        .with_state(state)
}
