//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! party registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Known-good and known-bad documents and records
//! - `builders`: Builder patterns for test data construction
//! - `stores`: Storage adapters for failure injection and temp directories
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod stores;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use stores::*;
pub use assertions::*;
pub use generators::*;
