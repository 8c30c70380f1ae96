//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating documents and records.
//! Valid documents are built by appending the computed check digits to a
//! random base, so they are correct by construction.

use domain_party::{DocumentValidator, NewParty, PartyType, PartyUpdate};
use proptest::prelude::*;

fn digit_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Strategy for both party types
pub fn party_type_strategy() -> impl Strategy<Value = PartyType> {
    prop_oneof![Just(PartyType::Individual), Just(PartyType::Organization)]
}

/// Strategy for a base of `len` digits that is not one repeated digit
fn document_base_strategy(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..10, len)
        .prop_filter("repeated digit", |digits| {
            digits.iter().any(|d| *d != digits[0])
        })
        .prop_map(|digits| digit_string(&digits))
}

/// Strategy for an unpunctuated document with correct check digits
pub fn valid_document_strategy(party_type: PartyType) -> impl Strategy<Value = String> {
    document_base_strategy(party_type.digit_count() - 2).prop_filter_map(
        "no check digits",
        move |base| {
            let [first, second] = DocumentValidator::check_digits(&base, party_type)?;
            Some(format!("{base}{first}{second}"))
        },
    )
}

/// Strategy for a valid unpunctuated CPF
pub fn valid_cpf_strategy() -> impl Strategy<Value = String> {
    valid_document_strategy(PartyType::Individual)
}

/// Strategy for a valid unpunctuated CNPJ
pub fn valid_cnpj_strategy() -> impl Strategy<Value = String> {
    valid_document_strategy(PartyType::Organization)
}

/// Strategy for a document made of a single repeated digit
pub fn repeated_digit_document_strategy(party_type: PartyType) -> impl Strategy<Value = String> {
    (0u8..10).prop_map(move |d| digit_string(&[d]).repeat(party_type.digit_count()))
}

/// Strategy for a digit string whose length is wrong for `party_type`
pub fn wrong_length_document_strategy(party_type: PartyType) -> impl Strategy<Value = String> {
    let expected = party_type.digit_count();
    prop::collection::vec(0u8..10, 0..20)
        .prop_filter("matches expected length", move |digits| digits.len() != expected)
        .prop_map(|digits| digit_string(&digits))
}

/// Strategy for form-valid creation data of either type
pub fn new_party_strategy() -> impl Strategy<Value = NewParty> {
    (
        party_type_strategy(),
        "[A-Z][a-z]{2,20} [A-Z][a-z]{2,20}",
        "[a-z]{3,12}",
        0u32..100_000_000,
        "[A-Z][a-z]{4,20}, [1-9][0-9]{0,3}",
    )
        .prop_flat_map(|(party_type, name, user, phone, street)| {
            valid_document_strategy(party_type).prop_map(move |document| NewParty {
                name: name.clone(),
                party_type,
                document: DocumentValidator::format_document(&document, party_type),
                email: format!("{user}@email.com"),
                phone: format!("(11) 9{:08}", phone),
                address: format!("Rua {street}"),
            })
        })
}

/// Strategy for partial updates touching zero or more text fields
pub fn party_update_strategy() -> impl Strategy<Value = PartyUpdate> {
    (
        proptest::option::of("[A-Z][a-z]{2,20} [A-Z][a-z]{2,20}"),
        proptest::option::of("[a-z]{3,12}@email\\.com"),
        proptest::option::of("Rua [A-Z][a-z]{4,20}, [1-9][0-9]{0,3}"),
    )
        .prop_map(|(name, email, address)| PartyUpdate {
            name,
            email,
            address,
            ..Default::default()
        })
}
