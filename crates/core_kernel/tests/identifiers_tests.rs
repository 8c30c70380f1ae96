//! Unit tests for the Identifiers module
//!
//! Tests cover party id conversion, parsing, JSON shape, and the
//! distinctness guarantees of the clock-derived generator.

use std::collections::HashSet;

use core_kernel::{IdGenerator, PartyId};
use proptest::prelude::*;

mod party_id_tests {
    use super::*;

    #[test]
    fn test_raw_conversion() {
        let id = PartyId::from(1_700_000_000_123);
        let back: i64 = id.into();
        assert_eq!(back, 1_700_000_000_123);
        assert_eq!(id.value(), back);
    }

    #[test]
    fn test_json_is_a_plain_number() {
        let id = PartyId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let parsed: PartyId = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(parsed, PartyId::new(1_700_000_000_000));
    }

    #[test]
    fn test_json_number_forms_are_accepted() {
        let expected = PartyId::new(1_700_000_000_000);
        for raw in ["1700000000000", "1700000000000.0", "1.7e12", "17e11"] {
            let parsed: PartyId = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected, "{raw}");
        }
        let max: PartyId = serde_json::from_str("9223372036854775807").unwrap();
        assert_eq!(max, PartyId::new(i64::MAX));
    }

    #[test]
    fn test_non_integral_ids_are_rejected() {
        for raw in ["1.5", "\"7\"", "9223372036854775808", "1e19", "null"] {
            assert!(serde_json::from_str::<PartyId>(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(PartyId::new(1) < PartyId::new(2));
    }

    proptest! {
        #[test]
        fn prop_display_parse_roundtrip(value in any::<i64>()) {
            let id = PartyId::new(value);
            let parsed: PartyId = id.to_string().parse().unwrap();
            prop_assert_eq!(id, parsed);
        }
    }
}

mod id_generator_tests {
    use super::*;

    #[test]
    fn test_burst_of_ids_is_distinct() {
        let mut ids = IdGenerator::new();
        let issued: Vec<PartyId> = (0..10_000).map(|_| ids.next_id()).collect();

        let unique: HashSet<_> = issued.iter().copied().collect();
        assert_eq!(unique.len(), issued.len());
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let issued: Vec<PartyId> = (0..1_000).map(|_| ids.next_id()).collect();
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_ids_are_clock_derived() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = IdGenerator::new().next_id();
        assert!(id.value() >= before);
    }

    #[test]
    fn test_observed_ids_are_never_reissued() {
        let mut ids = IdGenerator::new();
        let far_future = PartyId::new(i64::MAX / 2);
        ids.observe(far_future);

        assert_eq!(ids.next_id(), PartyId::new(i64::MAX / 2 + 1));
        assert_eq!(ids.last_issued(), i64::MAX / 2 + 1);
    }

    #[test]
    fn test_maximum_id_does_not_overflow() {
        let mut ids = IdGenerator::new();
        ids.observe(PartyId::new(i64::MAX));
        ids.observe(PartyId::new(1));
        ids.observe(PartyId::new(2));
        ids.observe(PartyId::new(4));

        assert_eq!(ids.next_id(), PartyId::new(3));
        assert_eq!(ids.next_id(), PartyId::new(5));
        assert_eq!(ids.next_id(), PartyId::new(6));
        assert_eq!(ids.last_issued(), i64::MAX);
    }

    #[test]
    fn test_ids_after_maximum_stay_distinct() {
        let mut ids = IdGenerator::new();
        ids.observe(PartyId::new(i64::MAX));

        let issued: Vec<PartyId> = (0..100).map(|_| ids.next_id()).collect();
        let unique: HashSet<_> = issued.iter().copied().collect();
        assert_eq!(unique.len(), issued.len());
        assert!(issued.iter().all(|id| id.value() > 0 && id.value() < i64::MAX));
    }

    #[test]
    fn test_observing_smaller_id_keeps_last() {
        let mut ids = IdGenerator::new();
        let issued = ids.next_id();
        ids.observe(PartyId::new(1));
        assert_eq!(ids.last_issued(), issued.value());
    }
}
