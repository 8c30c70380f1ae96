//! Party Registry
//!
//! The registry is the single owner of the party collection. It assigns ids,
//! applies create/update/delete, writes the full collection to a
//! [`KeyValueStore`] slot after every successful mutation, and publishes the
//! new snapshot to every subscriber.
//!
//! # Ordering
//!
//! Mutating operations take `&mut self`, so mutate → persist → publish runs
//! to completion before any other caller can observe the registry. Callers
//! sharing one registry across threads must wrap it in a single mutex.
//!
//! # Persistence failures
//!
//! A slot that is missing, unreadable or not valid JSON yields an empty
//! collection at open time; a failed write is logged and the in-memory state
//! stays authoritative. Neither surfaces as an error.
//!
//! # Usage
//!
//! ```rust
//! use core_kernel::InMemoryStore;
//! use domain_party::{PartyRegistry, DEFAULT_STORAGE_KEY};
//!
//! let mut registry = PartyRegistry::open(InMemoryStore::new(), DEFAULT_STORAGE_KEY);
//! let mut subscription = registry.subscribe();
//! assert_eq!(subscription.try_next().map(|s| s.len()), Some(0));
//!
//! registry.seed_if_empty();
//! assert_eq!(subscription.try_next().map(|s| s.len()), Some(2));
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use core_kernel::{IdGenerator, InMemoryStore, KeyValueStore, PartyId};
use crate::party::{NewParty, Party, PartyUpdate};
use crate::seed::sample_parties;

/// Storage slot shared with the UI
pub const DEFAULT_STORAGE_KEY: &str = "partes_interessadas";

/// Immutable point-in-time copy of the whole collection
pub type Snapshot = Arc<[Party]>;

/// Receiving end of a registry subscription
///
/// Yields the snapshot current at subscription time, then one snapshot per
/// successful mutation, in mutation order.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<Snapshot>,
}

impl Subscription {
    /// Returns the next pending snapshot without waiting
    pub fn try_next(&mut self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next snapshot; `None` once the registry is gone
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.receiver.recv().await
    }

    /// Drains pending snapshots and returns the most recent one
    pub fn latest(&mut self) -> Option<Snapshot> {
        let mut latest = None;
        while let Some(snapshot) = self.try_next() {
            latest = Some(snapshot);
        }
        latest
    }
}

/// Observable, persisted collection of parties
pub struct PartyRegistry {
    parties: Snapshot,
    ids: IdGenerator,
    store: Box<dyn KeyValueStore>,
    storage_key: String,
    subscribers: Vec<mpsc::UnboundedSender<Snapshot>>,
}

impl PartyRegistry {
    /// Opens a registry over `store`, reading `storage_key` once
    pub fn open(store: impl KeyValueStore + 'static, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let parties = Self::load(&store, &storage_key);

        let mut ids = IdGenerator::new();
        for party in &parties {
            ids.observe(party.id);
        }

        debug!(
            key = %storage_key,
            count = parties.len(),
            last_id = ids.last_issued(),
            "Party registry opened"
        );

        Self {
            parties: Arc::from(parties),
            ids,
            store: Box::new(store),
            storage_key,
            subscribers: Vec::new(),
        }
    }

    /// Opens an empty registry backed by a private in-memory store
    pub fn in_memory() -> Self {
        Self::open(InMemoryStore::new(), DEFAULT_STORAGE_KEY)
    }

    fn load(store: &dyn KeyValueStore, key: &str) -> Vec<Party> {
        match store.read(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Party>>(&raw) {
                Ok(parties) => parties,
                Err(e) => {
                    warn!(key, error = %e, "Stored parties are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored parties, starting empty");
                Vec::new()
            }
        }
    }

    /// Returns the storage slot this registry writes to
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Returns the current snapshot
    pub fn list(&self) -> Snapshot {
        Arc::clone(&self.parties)
    }

    /// Number of held records
    pub fn count(&self) -> usize {
        self.parties.len()
    }

    /// Returns true when the registry holds no records
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Looks up a record by id
    pub fn get_by_id(&self, id: PartyId) -> Option<Party> {
        self.parties.iter().find(|p| p.id == id).cloned()
    }

    /// Registers a new party under a fresh id and returns it
    ///
    /// The document is not re-validated here; callers validate first.
    pub fn add(&mut self, new_party: NewParty) -> Party {
        let party = Party::from_new(self.ids.next_id(), new_party);

        let mut next = self.parties.to_vec();
        next.push(party.clone());
        self.commit(next);

        debug!(id = %party.id, party_type = %party.party_type, "Party added");
        party
    }

    /// Replaces the supplied fields of the record with `id`
    ///
    /// Returns `false`, without mutating anything, if no such record exists.
    pub fn update(&mut self, id: PartyId, update: PartyUpdate) -> bool {
        let Some(index) = self.parties.iter().position(|p| p.id == id) else {
            debug!(%id, "Update ignored, party not found");
            return false;
        };

        let mut next = self.parties.to_vec();
        next[index].apply(update);
        self.commit(next);

        debug!(%id, "Party updated");
        true
    }

    /// Removes the record with `id`; `false` if it was not present
    pub fn delete(&mut self, id: PartyId) -> bool {
        let Some(index) = self.parties.iter().position(|p| p.id == id) else {
            debug!(%id, "Delete ignored, party not found");
            return false;
        };

        let mut next = self.parties.to_vec();
        next.remove(index);
        self.commit(next);

        debug!(%id, "Party deleted");
        true
    }

    /// Populates an empty registry with the sample records
    ///
    /// Returns whether anything was seeded; a non-empty registry is left as is.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.parties.is_empty() {
            return false;
        }

        let samples = sample_parties();
        for party in &samples {
            self.ids.observe(party.id);
        }
        info!(count = samples.len(), "Seeding party registry with sample data");
        self.commit(samples);
        true
    }

    /// Registers an observer
    ///
    /// The current snapshot is delivered immediately.
    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        // The receiver is alive, so this send cannot fail
        let _ = sender.send(self.list());
        self.subscribers.push(sender);
        Subscription { receiver }
    }

    /// Number of live subscriptions (as of the last publish)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn commit(&mut self, parties: Vec<Party>) {
        self.parties = Arc::from(parties);
        self.persist();
        self.publish();
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&*self.parties) {
            Ok(json) => json,
            Err(e) => {
                error!(key = %self.storage_key, error = %e, "Failed to serialize parties");
                return;
            }
        };
        if let Err(e) = self.store.write(&self.storage_key, &serialized) {
            error!(key = %self.storage_key, error = %e, "Failed to persist parties");
        }
    }

    fn publish(&mut self) {
        let snapshot = self.list();
        self.subscribers
            .retain(|subscriber| subscriber.send(Arc::clone(&snapshot)).is_ok());
    }
}

impl std::fmt::Debug for PartyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartyRegistry")
            .field("storage_key", &self.storage_key)
            .field("count", &self.parties.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::PartyType;

    fn new_party(name: &str) -> NewParty {
        NewParty {
            name: name.to_string(),
            party_type: PartyType::Individual,
            document: "529.982.247-25".to_string(),
            email: "parte@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
            address: "Rua das Flores, 123 - São Paulo/SP".to_string(),
        }
    }

    #[test]
    fn test_snapshots_are_detached_copies() {
        let mut registry = PartyRegistry::in_memory();
        let before = registry.list();
        registry.add(new_party("Ana Lima"));

        assert_eq!(before.len(), 0);
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn test_dropped_subscriptions_are_pruned() {
        let mut registry = PartyRegistry::in_memory();
        let kept = registry.subscribe();
        drop(registry.subscribe());
        assert_eq!(registry.subscriber_count(), 2);

        registry.add(new_party("Ana Lima"));
        assert_eq!(registry.subscriber_count(), 1);
        drop(kept);
    }

    #[test]
    fn test_ids_continue_after_loaded_records() {
        let store = InMemoryStore::with_slot(
            DEFAULT_STORAGE_KEY,
            r#"[{"id": 9000000000000, "nome": "Ana Lima", "tipo": "PF",
                 "documento": "529.982.247-25", "email": "ana@email.com",
                 "telefone": "(11) 99999-9999", "endereco": "Rua das Flores, 123"}]"#,
        );
        let mut registry = PartyRegistry::open(store, DEFAULT_STORAGE_KEY);

        let added = registry.add(new_party("Bruno Reis"));
        assert!(added.id > PartyId::new(9_000_000_000_000));
    }
}
