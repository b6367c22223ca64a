//! Directory index repository: which entities exist in a namespace.
//!
//! The index is stored as a single JSON array under the namespace's own name
//! inside its directory partition. It is reset to `[]` at the start of each
//! ingestion cycle and repopulated by the collection step.

use leak_core::namespace::Namespace;

use crate::LeakDb;
use crate::error::DatabaseError;
use crate::helpers::{decode_directory, encode};
use crate::partition::Partition;

/// Placeholder written by a directory reset.
pub const EMPTY_DIRECTORY: &str = "[]";

impl LeakDb {
    /// Read the directory index for `namespace`.
    ///
    /// A namespace that has never been bootstrapped reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MalformedDirectory` if the stored index cannot
    /// be decoded, or another `DatabaseError` if the query fails.
    pub async fn directory(&self, namespace: Namespace) -> Result<Vec<String>, DatabaseError> {
        match self
            .get_raw(Partition::directory(namespace), namespace.as_str())
            .await?
        {
            Some(raw) => decode_directory(namespace, &raw),
            None => Ok(Vec::new()),
        }
    }

    /// Reset the directory index for `namespace` to the empty sequence.
    ///
    /// Snapshots are left in place; entities missing from the index are simply
    /// no longer refreshed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write fails.
    pub async fn reset_directory(&self, namespace: Namespace) -> Result<(), DatabaseError> {
        self.put_raw(
            Partition::directory(namespace),
            namespace.as_str(),
            EMPTY_DIRECTORY,
        )
        .await
    }

    /// Reset every directory index. This is the first step of an ingestion
    /// cycle and must complete before collection starts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on the first failed write.
    pub async fn reset_directories(&self) -> Result<(), DatabaseError> {
        for namespace in Namespace::ALL {
            self.reset_directory(namespace).await?;
            tracing::info!(%namespace, "directory index reset");
        }
        Ok(())
    }

    /// Append `names` to the directory index, skipping names already present
    /// and blank names. Names are stored verbatim, surrounding whitespace
    /// included, since they double as snapshot keys. Returns the names
    /// actually added, in input order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the index cannot be read, decoded, or written.
    pub async fn add_to_directory<S: AsRef<str>>(
        &self,
        namespace: Namespace,
        names: &[S],
    ) -> Result<Vec<String>, DatabaseError> {
        let partition = Partition::directory(namespace);
        let tx = self.conn().transaction().await?;

        let mut rows = tx
            .query(
                "SELECT value FROM kv_entries WHERE partition = ?1 AND key = ?2",
                [partition.as_str(), namespace.as_str()],
            )
            .await?;
        let mut index = match rows.next().await? {
            Some(row) => decode_directory(namespace, &row.get::<String>(0)?)?,
            None => Vec::new(),
        };
        drop(rows);

        let mut added = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() || index.iter().any(|existing| existing == name) {
                continue;
            }
            index.push(name.to_string());
            added.push(name.to_string());
        }

        if !added.is_empty() {
            let value = encode(&index)?;
            tx.execute(
                "INSERT INTO kv_entries (partition, key, value, updated_at)
                 VALUES (?1, ?2, ?3, datetime('now'))
                 ON CONFLICT (partition, key)
                 DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                [partition.as_str(), namespace.as_str(), value.as_str()],
            )
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(%namespace, added = added.len(), "directory index updated");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn test_db() -> LeakDb {
        LeakDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn unbootstrapped_directory_is_empty() {
        let db = test_db().await;
        assert!(db.directory(Namespace::Groups).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_dedupes_and_keeps_order() {
        let db = test_db().await;
        let added = db
            .add_to_directory(Namespace::Groups, &["Akira", "LockBit 3.0", "Akira", "  ", "Cl0p"])
            .await
            .unwrap();
        assert_eq!(added, vec!["Akira", "LockBit 3.0", "Cl0p"]);

        let again = db
            .add_to_directory(Namespace::Groups, &["Cl0p", "Play"])
            .await
            .unwrap();
        assert_eq!(again, vec!["Play"]);
        assert_eq!(
            db.directory(Namespace::Groups).await.unwrap(),
            vec!["Akira", "LockBit 3.0", "Cl0p", "Play"]
        );
    }

    #[tokio::test]
    async fn names_are_stored_verbatim() {
        let db = test_db().await;
        let added = db
            .add_to_directory(Namespace::Groups, &[" Akira ", "Akira"])
            .await
            .unwrap();
        assert_eq!(added, vec![" Akira ", "Akira"]);

        db.replace_snapshot(Namespace::Groups, " Akira ", &[leak_core::entities::Post::new("x")])
            .await
            .unwrap();
        assert!(db.snapshot(Namespace::Groups, " Akira ").await.unwrap().is_some());
        assert!(db.snapshot(Namespace::Groups, "Akira").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reset_directories_empties_both_namespaces() {
        let db = test_db().await;
        db.add_to_directory(Namespace::Groups, &["Akira"]).await.unwrap();
        db.add_to_directory(Namespace::Leaks, &["BreachForums"]).await.unwrap();

        db.reset_directories().await.unwrap();

        for namespace in Namespace::ALL {
            assert!(db.directory(namespace).await.unwrap().is_empty());
            assert_eq!(
                db.get_raw(Partition::directory(namespace), namespace.as_str())
                    .await
                    .unwrap()
                    .as_deref(),
                Some(EMPTY_DIRECTORY)
            );
        }
    }

    #[tokio::test]
    async fn malformed_directory_is_reported() {
        let db = test_db().await;
        db.put_raw(Partition::directory(Namespace::Leaks), "leaks", "oops")
            .await
            .unwrap();
        let err = db.directory(Namespace::Leaks).await.unwrap_err();
        assert!(matches!(err, DatabaseError::MalformedDirectory { .. }));
    }
}
