use crate::catalog::Catalog;
use crate::model::{CatalogError, Feature, RoomFeatures, RoomRecord, StorageError};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use std::path::Path;
use std::str::FromStr;

/// SQLite persistence for the precomputed catalog.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Opens the database and creates the catalog tables when missing.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::init(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS rooms (
                position INTEGER PRIMARY KEY,
                lp_id TEXT NOT NULL,
                room_name TEXT NOT NULL,
                normalized TEXT NOT NULL,
                tokens TEXT NOT NULL DEFAULT '[]',
                room_type TEXT,
                bed_type TEXT,
                num_beds INTEGER,
                num_bedrooms INTEGER
            );

            CREATE TABLE IF NOT EXISTS catalog_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        Ok(Self { conn })
    }

    /// Column names currently present on `table`.
    fn table_columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;
        Ok(columns)
    }

    /// Replaces the stored catalog wholesale in a single transaction.
    pub fn save_catalog(&mut self, catalog: &Catalog) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM rooms", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO rooms (
                    position, lp_id, room_name, normalized, tokens,
                    room_type, bed_type, num_beds, num_bedrooms
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;

            for (position, record) in catalog.records().iter().enumerate() {
                let f = &record.features;
                stmt.execute(params![
                    position as i64,
                    &record.hotel_id,
                    &record.room_name,
                    &f.normalized,
                    serde_json::to_string(&f.tokens)?,
                    f.room_type.as_option().map(|t| t.as_str()),
                    f.bed_type.as_option().map(|t| t.as_str()),
                    f.num_beds.as_option(),
                    f.num_bedrooms.as_option(),
                ])?;
            }
        }

        tx.execute(
            "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES ('built_at', ?1)",
            params![Utc::now().to_rfc3339()],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES ('row_count', ?1)",
            params![catalog.len().to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Loads the catalog in its original row order.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        let columns = self.table_columns("rooms").map_err(CatalogError::Storage)?;
        if !columns.iter().any(|c| c == "lp_id") {
            return Err(CatalogError::MalformedCatalog {
                column: "lp_id".to_string(),
            });
        }

        let records = self.load_records().map_err(CatalogError::Storage)?;
        Ok(Catalog::new(records))
    }

    fn load_records(&self) -> Result<Vec<RoomRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT lp_id, room_name, normalized, tokens, room_type, bed_type, num_beds, num_bedrooms
             FROM rooms ORDER BY position ASC",
        )?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(Self::map_record(row)?);
        }
        Ok(records)
    }

    /// Timestamp of the last successful `save_catalog`, if any.
    pub fn built_at(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM catalog_meta WHERE key = 'built_at'")?;
        let mut rows = stmt.query([])?;

        if let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            let built_at = value
                .parse()
                .map_err(|_| StorageError::InvalidValue {
                    column: "built_at",
                    value,
                })?;
            Ok(Some(built_at))
        } else {
            Ok(None)
        }
    }

    fn parse_keyword<T: FromStr>(column: &'static str, value: Option<String>) -> Result<Feature<T>, StorageError> {
        match value {
            None => Ok(Feature::Unknown),
            Some(text) => text
                .parse()
                .map(Feature::Known)
                .map_err(|_| StorageError::InvalidValue { column, value: text }),
        }
    }

    fn map_record(row: &Row) -> Result<RoomRecord, StorageError> {
        let tokens_json: String = row.get(3)?;
        let room_type: Option<String> = row.get(4)?;
        let bed_type: Option<String> = row.get(5)?;
        let num_beds: Option<u32> = row.get(6)?;
        let num_bedrooms: Option<u32> = row.get(7)?;

        Ok(RoomRecord {
            hotel_id: row.get(0)?,
            room_name: row.get(1)?,
            features: RoomFeatures {
                normalized: row.get(2)?,
                tokens: serde_json::from_str(&tokens_json)?,
                room_type: Self::parse_keyword("room_type", room_type)?,
                bed_type: Self::parse_keyword("bed_type", bed_type)?,
                num_beds: num_beds.into(),
                num_bedrooms: num_bedrooms.into(),
            },
        })
    }
}
