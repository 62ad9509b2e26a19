//! Structured attributes inferred from normalized room names.

use crate::model::{BedType, Feature, RoomFeatures, RoomType};
use crate::normalizer::{normalize, tokenize};
use regex::Regex;
use std::sync::LazyLock;

// One alternation: the leftmost keyword in the text wins, not the first listed.
static RE_ROOM_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(house|suite|apartment|loft|room)\b").expect("Invalid regex")
});

fn bed_type_of(token: &str) -> Option<BedType> {
    token.parse().ok()
}

fn is_count(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Value of the first matching count. An overflowing count ends the scan as unknown.
fn first_count<'a>(mut counts: impl Iterator<Item = &'a String>) -> Feature<u32> {
    counts
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .into()
}

pub fn extract_room_type(normalized: &str) -> Feature<RoomType> {
    RE_ROOM_TYPE
        .captures(normalized)
        .and_then(|caps| caps[1].parse::<RoomType>().ok())
        .into()
}

/// First bed size immediately followed by `bed`, e.g. `king bed`.
pub fn extract_bed_type(tokens: &[String]) -> Feature<BedType> {
    tokens
        .windows(2)
        .find_map(|pair| match bed_type_of(&pair[0]) {
            Some(bed) if pair[1] == "bed" => Some(bed),
            _ => None,
        })
        .into()
}

/// First count directly preceding a bed size, e.g. `2 twin` -> 2.
pub fn extract_beds(tokens: &[String]) -> Feature<u32> {
    first_count(
        tokens
            .windows(2)
            .filter(|pair| is_count(&pair[0]) && bed_type_of(&pair[1]).is_some())
            .map(|pair| &pair[0]),
    )
}

/// First count directly preceding `bedroom`, e.g. `3 bedroom` -> 3.
pub fn extract_bedroom_count(tokens: &[String]) -> Feature<u32> {
    first_count(
        tokens
            .windows(2)
            .filter(|pair| is_count(&pair[0]) && pair[1] == "bedroom")
            .map(|pair| &pair[0]),
    )
}

/// Full feature vector for a raw room name.
pub fn extract_features(room_name: &str) -> RoomFeatures {
    let normalized = normalize(room_name);
    let tokens = tokenize(room_name);

    RoomFeatures {
        room_type: extract_room_type(&normalized),
        bed_type: extract_bed_type(&tokens),
        num_beds: extract_beds(&tokens),
        num_bedrooms: extract_bedroom_count(&tokens),
        normalized,
        tokens,
    }
}
