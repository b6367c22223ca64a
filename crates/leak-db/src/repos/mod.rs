//! Typed repositories over the key-value partitions.

pub mod directory;
pub mod snapshot;
