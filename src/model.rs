// Core structs: RawRoom, RoomRecord, RoomMatch and the error enums
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A feature value that may not be derivable from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature<T> {
    Known(T),
    Unknown,
}

impl<T> Default for Feature<T> {
    fn default() -> Self {
        Feature::Unknown
    }
}

impl<T: PartialEq> Feature<T> {
    /// Equal-or-unknown: only two known, different values are incompatible.
    pub fn is_compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (Feature::Known(a), Feature::Known(b)) => a == b,
            _ => true,
        }
    }
}

impl<T> Feature<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Feature::Known(v) => Some(v),
            Feature::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Feature<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Feature::Unknown, Feature::Known)
    }
}

impl<T: Serialize> Serialize for Feature<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Feature::Known(v) => serializer.serialize_some(v),
            Feature::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Feature<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Feature::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    House,
    Suite,
    Apartment,
    Loft,
    Room,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::House => "house",
            RoomType::Suite => "suite",
            RoomType::Apartment => "apartment",
            RoomType::Loft => "loft",
            RoomType::Room => "room",
        }
    }
}

impl FromStr for RoomType {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(RoomType::House),
            "suite" => Ok(RoomType::Suite),
            "apartment" => Ok(RoomType::Apartment),
            "loft" => Ok(RoomType::Loft),
            "room" => Ok(RoomType::Room),
            other => Err(UnknownKeyword(other.to_string())),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedType {
    King,
    Twin,
    Double,
    Queen,
}

impl BedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BedType::King => "king",
            BedType::Twin => "twin",
            BedType::Double => "double",
            BedType::Queen => "queen",
        }
    }
}

impl FromStr for BedType {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "king" => Ok(BedType::King),
            "twin" => Ok(BedType::Twin),
            "double" => Ok(BedType::Double),
            "queen" => Ok(BedType::Queen),
            other => Err(UnknownKeyword(other.to_string())),
        }
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised keyword `{0}`")]
pub struct UnknownKeyword(pub String);

/// Everything derived from a room name. Identical for catalog rows and supplier queries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomFeatures {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub room_type: Feature<RoomType>,
    pub bed_type: Feature<BedType>,
    pub num_beds: Feature<u32>,
    pub num_bedrooms: Feature<u32>,
}

/// One row of the raw internal catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRoom {
    #[serde(rename = "lp_id")]
    pub hotel_id: String,
    pub room_name: String,
}

/// One row of the precomputed catalog. Storage maps it column by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub hotel_id: String,
    pub room_name: String,
    pub features: RoomFeatures,
}

/// A ranked candidate: catalog room name plus its 0..=100 similarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMatch {
    pub room_name: String,
    pub similarity: u8,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is missing required column `{column}`")]
    MalformedCatalog { column: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("invalid value `{value}` in column `{column}`")]
    InvalidValue { column: &'static str, value: String },
    #[error("token encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
