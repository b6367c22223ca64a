//! Entity structs stored per tracked group or leak site.
//!
//! A snapshot is the complete, ordered list of posts for one entity. Writing a
//! snapshot replaces the previous one wholesale; posts are never merged.

mod post;

pub use post::{Post, Snapshot};
