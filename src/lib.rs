//! Supplier room-name matching against an internal hotel room catalog.

pub mod api;
pub mod catalog;
pub mod config;
pub mod features;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod storage;

pub use catalog::Catalog;
pub use matcher::match_supplier_room;
pub use model::{BedType, Feature, RoomFeatures, RoomMatch, RoomRecord, RoomType};
