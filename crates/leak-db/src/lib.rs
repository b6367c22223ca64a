//! # leak-db
//!
//! libSQL-backed key-value store for leakwatch.
//!
//! The store holds, per namespace, a directory index of known entity names
//! and one JSON snapshot of posts per entity. Every write is a single-row
//! upsert; there are no multi-key transactions apart from directory appends.
//!
//! The handle is constructed explicitly and passed to each component; the
//! connection closes when the last [`LeakDb`] is dropped.

pub mod error;
pub mod helpers;
mod kv;
mod migrations;
pub mod partition;
pub mod repos;

use error::DatabaseError;
use libsql::Builder;

pub use partition::{Partition, PartitionKind};
pub use repos::snapshot::StoredSnapshot;

/// Central database handle for the entity registry.
pub struct LeakDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LeakDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let leak_db = Self { db, conn };
        leak_db.run_migrations().await?;
        tracing::debug!(path, "opened entity store");
        Ok(leak_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
