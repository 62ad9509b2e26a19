// Raw internal catalog CSV reader
use crate::model::{CatalogError, RawRoom};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 2] = ["lp_id", "room_name"];

pub fn read_raw_catalog(path: impl AsRef<Path>) -> Result<Vec<RawRoom>, CatalogError> {
    let file = File::open(path)?;
    read_raw_catalog_from(file)
}

/// Parses a headered CSV. Extra columns are ignored; `lp_id` and `room_name` are required.
pub fn read_raw_catalog_from<R: Read>(reader: R) -> Result<Vec<RawRoom>, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MalformedCatalog {
                column: column.to_string(),
            });
        }
    }

    let mut rooms = Vec::new();
    for row in rdr.deserialize() {
        let room: RawRoom = row?;
        rooms.push(room);
    }
    Ok(rooms)
}
