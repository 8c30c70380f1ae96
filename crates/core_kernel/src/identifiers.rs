//! Strongly-typed identifiers for registry entities
//!
//! Party identifiers are plain integers on the wire (the persisted layout is
//! shared with a UI that stores them as JSON numbers), wrapped in a newtype so
//! they cannot be mixed with counts or indices.

use chrono::Utc;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a registered party
///
/// Decoding accepts any JSON number with an integral value in range, so
/// `1700000000000`, `1700000000000.0` and `1.7e12` name the same party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PartyId(i64);

impl PartyId {
    /// Creates an identifier from a raw value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PartyId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl<'de> Deserialize<'de> for PartyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PartyIdVisitor)
    }
}

struct PartyIdVisitor;

impl Visitor<'_> for PartyIdVisitor {
    type Value = PartyId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integral number fitting in 64 bits")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<PartyId, E> {
        Ok(PartyId(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<PartyId, E> {
        i64::try_from(value)
            .map(PartyId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<PartyId, E> {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        if value.is_finite() && value.fract() == 0.0 && in_range {
            Ok(PartyId(value as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}

impl From<i64> for PartyId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PartyId> for i64 {
    fn from(id: PartyId) -> i64 {
        id.0
    }
}

/// Clock-derived source of distinct party identifiers
///
/// Each issued id is the current Unix time in milliseconds, bumped past the
/// last issued (or observed) id when the clock has not advanced. Ids are
/// therefore strictly increasing within a process, even for calls made in
/// the same millisecond.
///
/// Once the highest id reaches `i64::MAX` there is nothing left above it;
/// the generator then hands out the lowest positive id it has never issued
/// or observed.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
    seen: BTreeSet<i64>,
}

impl IdGenerator {
    /// Creates a generator that has issued nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next identifier
    pub fn next_id(&mut self) -> PartyId {
        let now = Utc::now().timestamp_millis();
        let candidate = if now > self.last {
            Some(now)
        } else {
            self.last.checked_add(1)
        };

        let id = match candidate {
            Some(id) => id,
            None => {
                let id = self.lowest_unused();
                tracing::warn!(id, "Id space above the highest id is exhausted, reusing a gap");
                id
            }
        };

        self.last = self.last.max(id);
        self.seen.insert(id);
        PartyId(id)
    }

    /// Records an id issued elsewhere (e.g. loaded from storage) so it is never reissued
    pub fn observe(&mut self, id: PartyId) {
        self.last = self.last.max(id.0);
        self.seen.insert(id.0);
    }

    fn lowest_unused(&self) -> i64 {
        let mut id = 1;
        for used in self.seen.range(1..) {
            if *used != id {
                break;
            }
            id = id.saturating_add(1);
        }
        id
    }

    /// Returns the highest id issued or observed so far
    pub fn last_issued(&self) -> i64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_display() {
        assert_eq!(PartyId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: PartyId = " 1700000000000 ".parse().unwrap();
        assert_eq!(parsed, PartyId::new(1_700_000_000_000));
        assert!("abc".parse::<PartyId>().is_err());
    }

    #[test]
    fn test_generator_issues_distinct_ids() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(second > first);
    }

    #[test]
    fn test_generator_skips_observed_ids() {
        let mut ids = IdGenerator::new();
        let future = PartyId::new(Utc::now().timestamp_millis() + 60_000);
        ids.observe(future);
        assert!(ids.next_id() > future);
    }
}
