//! Registry workflows across storage, forms and subscriptions

use core_kernel::{InMemoryStore, KeyValueStore, PartyId};
use domain_party::{
    DocumentValidator, FieldValidationAdapter, PartyForm, PartyRegistry, PartyType,
    DEFAULT_STORAGE_KEY,
};
use proptest::prelude::*;
use test_utils::*;

#[test]
fn test_failed_write_keeps_state_and_still_publishes() {
    let store = FailingStore::new();
    let mut registry = PartyRegistry::open(store.clone(), DEFAULT_STORAGE_KEY);
    let mut subscription = registry.subscribe();
    assert_snapshot_ids(&subscription.try_next().unwrap(), &[]);

    store.fail_writes(true);
    let added = registry.add(NewPartyBuilder::new().build());

    assert_eq!(registry.get_by_id(added.id), Some(added.clone()));
    assert_eq!(subscription.try_next().map(|s| s.len()), Some(1));
    assert_eq!(store.write_attempts(), 1);
    assert!(store.inner().read(DEFAULT_STORAGE_KEY).unwrap().is_none());

    store.fail_writes(false);
    registry.delete(added.id);
    assert_persisted(store.inner(), DEFAULT_STORAGE_KEY, &[]);
}

#[test]
fn test_unreadable_store_opens_empty() {
    let inner = InMemoryStore::with_slot(
        DEFAULT_STORAGE_KEY,
        PartyFixtures::stored_json(&[PartyFixtures::stored(1)]),
    );
    let store = FailingStore::wrapping(inner);
    store.fail_reads(true);

    let registry = PartyRegistry::open(store, DEFAULT_STORAGE_KEY);
    assert!(registry.is_empty());
}

#[test]
fn test_corrupt_slot_opens_empty_and_is_overwritten() {
    let store = InMemoryStore::with_slot(DEFAULT_STORAGE_KEY, "{not json");
    let mut registry = PartyRegistry::open(store.clone(), DEFAULT_STORAGE_KEY);
    assert!(registry.is_empty());

    let added = registry.add(PartyFixtures::organization());
    assert_persisted(&store, DEFAULT_STORAGE_KEY, &[added]);
}

#[test]
fn test_file_store_round_trip_through_registry() {
    let (dir, store) = temp_file_store();
    let created = {
        let mut registry = PartyRegistry::open(store, DEFAULT_STORAGE_KEY);
        registry.seed_if_empty();
        NewPartyBuilder::organization()
            .with_name("Padaria Pão Quente ME")
            .build_form()
            .submit(&mut registry, None)
            .unwrap()
    };

    let reopened = PartyRegistry::open(core_kernel::FileStore::new(dir.path()), DEFAULT_STORAGE_KEY);
    assert_eq!(reopened.count(), 3);
    assert_eq!(reopened.get_by_id(created.id), Some(created));
    assert_unique_ids(&reopened.list());
}

#[test]
fn test_form_edit_flow() {
    let mut registry = PartyRegistry::in_memory();
    registry.seed_if_empty();
    let existing = registry.get_by_id(PartyId::new(2)).unwrap();

    let mut form = PartyForm::from_party(&existing);
    form.change_type(PartyType::Individual, true);
    assert_invalid_field(&form.check(), "documento");

    form.document = DocumentFixtures::valid_cpf().to_string();
    assert_valid(&form.check());
    let saved = form.submit(&mut registry, Some(existing.id)).unwrap();

    assert_eq!(saved.id, existing.id);
    assert_eq!(saved.party_type, PartyType::Individual);
    assert_eq!(saved.document, DocumentFixtures::valid_cpf_formatted());
    assert_eq!(registry.count(), 2);
}

#[tokio::test]
async fn test_subscriber_on_another_task_sees_every_mutation() {
    let mut registry = PartyRegistry::in_memory();
    let mut subscription = registry.subscribe();

    let watcher = tokio::spawn(async move {
        let mut counts = Vec::new();
        while let Some(snapshot) = subscription.next().await {
            counts.push(snapshot.len());
        }
        counts
    });

    let first = registry.add(NewPartyBuilder::new().build());
    registry.add(NewPartyBuilder::organization().build());
    registry.delete(first.id);
    drop(registry);

    assert_eq!(watcher.await.unwrap(), vec![0, 1, 2, 1]);
}

proptest! {
    #[test]
    fn formatted_documents_stay_valid(
        (party_type, document) in party_type_strategy()
            .prop_flat_map(|t| (Just(t), valid_document_strategy(t)))
    ) {
        let formatted = DocumentValidator::format_document(&document, party_type);
        prop_assert_eq!(formatted.len(), party_type.document_mask().len());
        prop_assert!(DocumentValidator::is_valid_document(&formatted, party_type));
        prop_assert_eq!(domain_party::digits_only(&formatted), document);
    }

    #[test]
    fn repeated_digit_documents_are_rejected(
        (party_type, document) in party_type_strategy()
            .prop_flat_map(|t| (Just(t), repeated_digit_document_strategy(t)))
    ) {
        prop_assert!(!DocumentValidator::is_valid_document(&document, party_type));
        prop_assert!(!FieldValidationAdapter::check(&document, Some(party_type)).is_valid());
    }

    #[test]
    fn wrong_length_documents_are_rejected(
        (party_type, document) in party_type_strategy()
            .prop_flat_map(|t| (Just(t), wrong_length_document_strategy(t)))
    ) {
        prop_assert!(!DocumentValidator::is_valid_document(&document, party_type));
        prop_assert_eq!(DocumentValidator::format_document(&document, party_type), document);
    }

    #[test]
    fn generated_parties_pass_the_form(new_party in new_party_strategy()) {
        let form = PartyForm::from_party(&domain_party::Party::from_new(PartyId::new(1), new_party));
        let result = form.check();
        prop_assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn registry_ids_stay_unique(parties in prop::collection::vec(new_party_strategy(), 1..8)) {
        let mut registry = PartyRegistry::in_memory();
        registry.seed_if_empty();
        for party in parties {
            registry.add(party);
        }
        assert_unique_ids(&registry.list());
    }

    #[test]
    fn updates_never_change_ids(update in party_update_strategy()) {
        let mut registry = PartyRegistry::in_memory();
        registry.seed_if_empty();
        let before: Vec<PartyId> = registry.list().iter().map(|p| p.id).collect();

        prop_assert!(registry.update(PartyId::new(1), update));
        let after: Vec<PartyId> = registry.list().iter().map(|p| p.id).collect();
        prop_assert_eq!(before, after);
    }
}
