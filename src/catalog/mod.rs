// Catalog module: the in-memory snapshot plus the offline build job.

pub mod builder;
pub mod csv_reader;

pub use builder::{build_catalog, enrich_room};
pub use csv_reader::{read_raw_catalog, read_raw_catalog_from};

use crate::model::{CatalogError, RoomRecord};
use crate::storage::CatalogStore;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Immutable precomputed catalog, indexed by hotel.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RoomRecord>,
    by_hotel: HashMap<String, Vec<usize>>,
}

impl Catalog {
    pub fn new(records: Vec<RoomRecord>) -> Self {
        let mut by_hotel: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_hotel.entry(record.hotel_id.clone()).or_default().push(idx);
        }
        Self { records, by_hotel }
    }

    pub fn records(&self) -> &[RoomRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn hotel_count(&self) -> usize {
        self.by_hotel.len()
    }

    /// Rows whose hotel id equals `hotel_id` exactly, in catalog order.
    pub fn rooms_for_hotel(&self, hotel_id: &str) -> Vec<&RoomRecord> {
        self.by_hotel
            .get(hotel_id)
            .map(|rows| rows.iter().map(|&idx| &self.records[idx]).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<RoomRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = RoomRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Reads the raw CSV, enriches every row and persists the result.
pub fn build_precomputed_catalog(
    raw_path: impl AsRef<Path>,
    store: &mut CatalogStore,
) -> Result<Catalog, CatalogError> {
    let raw_path = raw_path.as_ref();
    info!("Reading raw catalog from {}", raw_path.display());
    let raw = read_raw_catalog(raw_path)?;

    let catalog = build_catalog(&raw);
    store.save_catalog(&catalog)?;
    info!(
        "Precomputed catalog saved: {} rooms across {} hotels",
        catalog.len(),
        catalog.hotel_count()
    );

    Ok(catalog)
}

/// Loads the precomputed catalog, building it first when no build ever completed.
///
/// A build stamps `built_at` only on commit, so a store left behind by a
/// failed build is rebuilt instead of served empty.
pub fn load_or_build(
    raw_path: impl AsRef<Path>,
    store: &mut CatalogStore,
) -> Result<Catalog, CatalogError> {
    match store.built_at()? {
        Some(built_at) => {
            info!("Using precomputed catalog built at {}", built_at);
            store.load_catalog()
        }
        None => {
            info!("No completed catalog build found, building it");
            build_precomputed_catalog(raw_path, store)
        }
    }
}
