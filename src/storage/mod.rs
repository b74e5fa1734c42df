pub mod sqlite;

pub use sqlite::SnapshotStore;
