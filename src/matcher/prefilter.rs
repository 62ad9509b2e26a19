use crate::catalog::Catalog;
use crate::model::{RoomFeatures, RoomRecord};

/// True when every feature dimension passes the equal-or-unknown test.
pub fn features_compatible(query: &RoomFeatures, candidate: &RoomFeatures) -> bool {
    query.room_type.is_compatible(&candidate.room_type)
        && query.bed_type.is_compatible(&candidate.bed_type)
        && query.num_beds.is_compatible(&candidate.num_beds)
        && query.num_bedrooms.is_compatible(&candidate.num_bedrooms)
}

/// Same-hotel rows (exact, case-sensitive id) that are feature-compatible with the query.
pub fn prefilter<'a>(catalog: &'a Catalog, hotel_id: &str, query: &RoomFeatures) -> Vec<&'a RoomRecord> {
    let mut pool = catalog.rooms_for_hotel(hotel_id);
    pool.retain(|record| features_compatible(query, &record.features));
    pool
}
