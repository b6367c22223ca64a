//! Raw key-value access over the `kv_entries` table.

use crate::LeakDb;
use crate::error::DatabaseError;
use crate::partition::Partition;

impl LeakDb {
    /// Read the raw JSON text stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_raw(
        &self,
        partition: Partition,
        key: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT value FROM kv_entries WHERE partition = ?1 AND key = ?2",
                [partition.as_str(), key],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// Store `value` under `key`, replacing any previous value in one statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert fails.
    pub async fn put_raw(
        &self,
        partition: Partition,
        key: &str,
        value: &str,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO kv_entries (partition, key, value, updated_at)
                 VALUES (?1, ?2, ?3, datetime('now'))
                 ON CONFLICT (partition, key)
                 DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                [partition.as_str(), key, value],
            )
            .await?;
        Ok(())
    }

    /// All `(key, value)` pairs in a partition, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn entries(
        &self,
        partition: Partition,
    ) -> Result<Vec<(String, String)>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT key, value FROM kv_entries WHERE partition = ?1 ORDER BY key",
                [partition.as_str()],
            )
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push((row.get::<String>(0)?, row.get::<String>(1)?));
        }
        Ok(out)
    }

    /// All keys in a partition, ordered.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn keys(&self, partition: Partition) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT key FROM kv_entries WHERE partition = ?1 ORDER BY key",
                [partition.as_str()],
            )
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(row.get::<String>(0)?);
        }
        Ok(out)
    }
}
