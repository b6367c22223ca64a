//! # leak-core
//!
//! Core types, name normalization, and error types for leakwatch.
//!
//! This crate provides the foundational types shared across all leakwatch crates:
//! - Post and snapshot structs stored per tracked entity
//! - The [`Namespace`](namespace::Namespace) enum separating groups from leak sites
//! - Display-name normalization used to bind entities to scrapers
//! - Per-entity outcome and run report types printed by the CLI
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod naming;
pub mod namespace;
pub mod responses;
pub mod text;
pub mod timefmt;
