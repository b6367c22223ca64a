//! Snapshot repository: the complete post list for each entity.
//!
//! Writing a snapshot replaces the stored one in a single upsert. Reads decode
//! each entity independently so one corrupt value never hides the others.

use leak_core::entities::{Post, Snapshot};
use leak_core::namespace::Namespace;

use crate::LeakDb;
use crate::error::DatabaseError;
use crate::helpers::{decode_snapshot, encode};
use crate::partition::Partition;

/// One entity's stored snapshot, decoded on read.
#[derive(Debug)]
pub struct StoredSnapshot {
    pub entity: String,
    pub posts: Result<Snapshot, DatabaseError>,
}

impl LeakDb {
    /// Read and decode the snapshot for `entity`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MalformedSnapshot` if the stored value cannot be
    /// decoded, or another `DatabaseError` if the query fails.
    pub async fn snapshot(
        &self,
        namespace: Namespace,
        entity: &str,
    ) -> Result<Option<Snapshot>, DatabaseError> {
        self.get_raw(Partition::posts(namespace), entity)
            .await?
            .map(|raw| decode_snapshot(entity, &raw))
            .transpose()
    }

    /// Replace the snapshot for `entity` with `posts`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if encoding or the write fails.
    pub async fn replace_snapshot(
        &self,
        namespace: Namespace,
        entity: &str,
        posts: &[Post],
    ) -> Result<(), DatabaseError> {
        let value = encode(posts)?;
        self.put_raw(Partition::posts(namespace), entity, &value)
            .await
    }

    /// Every stored snapshot in `namespace`, ordered by entity name.
    ///
    /// This reads the posts partition directly and does not consult the
    /// directory index.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the partition cannot be listed. Per-entity
    /// decode failures are reported inside each [`StoredSnapshot`].
    pub async fn snapshots(
        &self,
        namespace: Namespace,
    ) -> Result<Vec<StoredSnapshot>, DatabaseError> {
        Ok(self
            .entries(Partition::posts(namespace))
            .await?
            .into_iter()
            .map(|(entity, raw)| {
                let posts = decode_snapshot(&entity, &raw);
                StoredSnapshot { entity, posts }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn test_db() -> LeakDb {
        LeakDb::open_local(":memory:").await.unwrap()
    }

    fn post(title: &str) -> Post {
        Post::new(title).discovered_at(
            NaiveDate::from_ymd_opt(2024, 1, 9)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn replace_overwrites_whole_snapshot() {
        let db = test_db().await;
        db.replace_snapshot(Namespace::Groups, "Akira", &vec![post("old-1"), post("old-2")])
            .await
            .unwrap();
        db.replace_snapshot(Namespace::Groups, "Akira", &vec![post("new")])
            .await
            .unwrap();

        let stored = db.snapshot(Namespace::Groups, "Akira").await.unwrap().unwrap();
        let titles: Vec<_> = stored.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new"]);
    }

    #[tokio::test]
    async fn missing_snapshot_is_none() {
        let db = test_db().await;
        assert!(db.snapshot(Namespace::Leaks, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshots_isolate_malformed_entries() {
        let db = test_db().await;
        db.replace_snapshot(Namespace::Groups, "Akira", &vec![post("a")])
            .await
            .unwrap();
        db.put_raw(Partition::posts(Namespace::Groups), "Broken", "{\"nope\"")
            .await
            .unwrap();
        db.replace_snapshot(Namespace::Groups, "Cl0p", &vec![post("c")])
            .await
            .unwrap();

        let all = db.snapshots(Namespace::Groups).await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.entity.as_str()).collect();
        assert_eq!(names, vec!["Akira", "Broken", "Cl0p"]);
        assert!(all[0].posts.is_ok());
        assert!(matches!(all[1].posts, Err(DatabaseError::MalformedSnapshot { .. })));
        assert!(all[2].posts.is_ok());
    }

    #[tokio::test]
    async fn snapshots_ignore_directory_membership() {
        let db = test_db().await;
        db.replace_snapshot(Namespace::Leaks, "Stale Site", &vec![post("x")])
            .await
            .unwrap();
        db.reset_directories().await.unwrap();

        let all = db.snapshots(Namespace::Leaks).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].entity, "Stale Site");
    }
}
