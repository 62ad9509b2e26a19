use crate::catalog::Catalog;
use crate::features::extract_features;
use crate::model::{RawRoom, RoomRecord};

pub fn enrich_room(raw: &RawRoom) -> RoomRecord {
    RoomRecord {
        hotel_id: raw.hotel_id.clone(),
        room_name: raw.room_name.clone(),
        features: extract_features(&raw.room_name),
    }
}

/// Attaches normalized text, tokens and features to every raw row, keeping order.
pub fn build_catalog(raw: &[RawRoom]) -> Catalog {
    raw.iter().map(enrich_room).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BedType, Feature, RoomType};

    fn raw(hotel_id: &str, room_name: &str) -> RawRoom {
        RawRoom {
            hotel_id: hotel_id.into(),
            room_name: room_name.into(),
        }
    }

    #[test]
    fn enriches_every_row_in_order() {
        let catalog = build_catalog(&[
            raw("lp1", "Superior Room, 2 Twin Beds"),
            raw("lp1", "Penthouse"),
        ]);

        let first = &catalog.records()[0];
        assert_eq!(first.room_name, "Superior Room, 2 Twin Beds");
        assert_eq!(first.features.normalized, "superior room 2 twin bed");
        assert_eq!(first.features.room_type, Feature::Known(RoomType::Room));
        assert_eq!(first.features.bed_type, Feature::Known(BedType::Twin));
        assert_eq!(first.features.num_beds, Feature::Known(2));
        assert_eq!(first.features.num_bedrooms, Feature::Unknown);

        let second = &catalog.records()[1];
        assert_eq!(second.features.room_type, Feature::Unknown);
    }

    #[test]
    fn catalog_and_query_features_agree() {
        let name = "Chambre Familiale – Deux Lits Queen";
        let record = enrich_room(&raw("lp9", name));
        assert_eq!(record.features, extract_features(name));
    }

    #[test]
    fn empty_input_builds_empty_catalog() {
        assert!(build_catalog(&[]).is_empty());
    }
}
