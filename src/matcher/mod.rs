// Matcher module: supplier features -> hotel prefilter -> token-set ranking.

pub mod prefilter;
pub mod similarity;

pub use prefilter::{features_compatible, prefilter};
pub use similarity::{score_candidates, token_set_ratio};

use crate::catalog::Catalog;
use crate::features::extract_features;
use crate::model::RoomMatch;
use tracing::debug;

/// Ranks the catalog rooms of `hotel_id` against a supplier room name.
///
/// Returns every compatible candidate sorted by similarity, or an empty list
/// when the hotel is unknown or nothing survives the prefilter.
pub fn match_supplier_room(catalog: &Catalog, hotel_id: &str, supplier_room_name: &str) -> Vec<RoomMatch> {
    let features = extract_features(supplier_room_name);
    let pool = prefilter(catalog, hotel_id, &features);

    debug!(
        hotel_id,
        normalized = %features.normalized,
        candidates = pool.len(),
        "prefilter done"
    );

    if pool.is_empty() {
        return Vec::new();
    }

    score_candidates(&features.normalized, &pool)
}
