use crate::model::StorageError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

const SNAPSHOT_KEY: &str = "listing-data";

/// Persists the last successfully fetched raw snapshot so the next start
/// can read it synchronously before going to the network.
pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshot (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                stored_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(Self { conn })
    }

    pub fn load_snapshot(&self) -> Result<Option<String>, StorageError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM snapshot WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    pub fn save_snapshot(&self, payload: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshot (key, payload, stored_at) VALUES (?1, ?2, ?3)",
            params![SNAPSHOT_KEY, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
