//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{InMemoryStore, KeyValueStore, PartyId};
use domain_party::{Party, Snapshot, ValidationResult};

/// Asserts that a validation result is valid
pub fn assert_valid(result: &ValidationResult) {
    assert!(
        result.is_valid,
        "Expected valid result, got errors: {:?}",
        result.errors
    );
}

/// Asserts that a validation result failed with an error for `field`
///
/// `field` is the external field name ("nome", "documento", ...).
pub fn assert_invalid_field(result: &ValidationResult, field: &str) {
    assert!(!result.is_valid, "Expected invalid result for field {field}");
    assert!(
        result.has_error_for(field),
        "Expected an error for {field}, got: {:?}",
        result.errors
    );
}

/// Asserts that ids in a snapshot are unique
pub fn assert_unique_ids(parties: &[Party]) {
    let mut ids: Vec<PartyId> = parties.iter().map(|p| p.id).collect();
    ids.sort();
    let before = ids.len();
    ids.dedup();
    assert_eq!(before, ids.len(), "Duplicate ids in {:?}", parties);
}

/// Asserts the ids of a snapshot, in order
pub fn assert_snapshot_ids(snapshot: &Snapshot, expected: &[i64]) {
    let actual: Vec<i64> = snapshot.iter().map(|p| p.id.value()).collect();
    assert_eq!(actual, expected, "Snapshot ids mismatch");
}

/// Asserts that a storage slot holds exactly `expected`
pub fn assert_persisted(store: &InMemoryStore, key: &str, expected: &[Party]) {
    let raw = store
        .read(key)
        .unwrap_or_else(|e| panic!("Failed to read slot {key}: {e}"))
        .unwrap_or_else(|| panic!("Slot {key} was never written"));
    let stored: Vec<Party> =
        serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Slot {key} holds invalid JSON: {e}"));
    assert_eq!(stored, expected, "Persisted parties mismatch in slot {key}");
}
