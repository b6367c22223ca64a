//! Logical partitions of the key-value table.
//!
//! Each namespace owns two partitions: a directory holding the index of known
//! entity names, and a posts partition holding one snapshot per entity.

use std::fmt;

use leak_core::namespace::Namespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Directory,
    Posts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    pub namespace: Namespace,
    pub kind: PartitionKind,
}

impl Partition {
    #[must_use]
    pub const fn directory(namespace: Namespace) -> Self {
        Self {
            namespace,
            kind: PartitionKind::Directory,
        }
    }

    #[must_use]
    pub const fn posts(namespace: Namespace) -> Self {
        Self {
            namespace,
            kind: PartitionKind::Posts,
        }
    }

    /// Value stored in the `partition` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match (self.namespace, self.kind) {
            (Namespace::Groups, PartitionKind::Directory) => "groups_directory",
            (Namespace::Groups, PartitionKind::Posts) => "groups_posts",
            (Namespace::Leaks, PartitionKind::Directory) => "leaks_directory",
            (Namespace::Leaks, PartitionKind::Posts) => "leaks_posts",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
