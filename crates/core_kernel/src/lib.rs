//! Core Kernel - Foundational types for the party registry
//!
//! This crate provides the building blocks shared by the domain and interface crates:
//! - Strongly-typed identifiers and the clock-derived id source
//! - The key-value storage port and its adapters
//! - Common error types

pub mod identifiers;
pub mod storage;
pub mod error;

pub use identifiers::{PartyId, IdGenerator};
pub use storage::{KeyValueStore, StorageError, InMemoryStore, FileStore};
pub use error::CoreError;
