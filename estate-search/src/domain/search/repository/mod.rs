//! Record store implementations.

#[cfg(test)]
mod mock;
mod sqlite;

#[cfg(test)]
pub use mock::MockRecordStore;
pub use sqlite::SqliteRecordStore;
