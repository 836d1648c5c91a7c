//! Persisted basket store.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};
use ticketbox_core::{BasketLedger, EventKey, LineItem, TicketTypeInfo, TicketTypeKey};

use crate::storage::{StateStore, load_state, save_state};

/// Storage key for basket contents.
pub const BASKET_STORAGE_KEY: &str = "basket-storage";

/// The basket ledger plus its persistence.
///
/// Loaded once at start-up and written back after every mutation that
/// changed something. Storage failures are logged and otherwise ignored:
/// basket operations never fail.
pub struct BasketStore {
    ledger: BasketLedger,
    storage: Arc<dyn StateStore>,
}

impl std::fmt::Debug for BasketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasketStore")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl BasketStore {
    /// Load the basket from storage, starting empty if nothing usable is stored.
    #[must_use]
    pub fn load(storage: Arc<dyn StateStore>) -> Self {
        let ledger = match load_state::<BasketLedger>(storage.as_ref(), BASKET_STORAGE_KEY) {
            Ok(Some(ledger)) => {
                // Re-validate: the blob may have been written by an older client.
                let ledger = BasketLedger::from_items(ledger.items().to_vec());
                debug!(items = ledger.len(), "Basket restored");
                ledger
            }
            Ok(None) => BasketLedger::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable basket state");
                BasketLedger::new()
            }
        };
        Self { ledger, storage }
    }

    #[must_use]
    pub const fn ledger(&self) -> &BasketLedger {
        &self.ledger
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.ledger.items()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.ledger.total()
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.ledger.count()
    }

    /// Mutations mirror [`BasketLedger`] and return whether anything changed.
    pub fn add_item(
        &mut self,
        ticket_type_key: TicketTypeKey,
        ticket_info: TicketTypeInfo,
        event_key: EventKey,
        event_title: impl Into<String>,
    ) -> bool {
        let changed = self
            .ledger
            .add_item(ticket_type_key, ticket_info, event_key, event_title);
        self.persist_if(changed);
        changed
    }

    pub fn remove_item(&mut self, ticket_type_key: &TicketTypeKey) -> bool {
        let changed = self.ledger.remove_item(ticket_type_key);
        self.persist_if(changed);
        changed
    }

    pub fn update_quantity(&mut self, ticket_type_key: &TicketTypeKey, quantity: i64) -> bool {
        let changed = self.ledger.update_quantity(ticket_type_key, quantity);
        self.persist_if(changed);
        changed
    }

    pub fn increase(&mut self, ticket_type_key: &TicketTypeKey) -> bool {
        let changed = self.ledger.increase(ticket_type_key);
        self.persist_if(changed);
        changed
    }

    pub fn decrease(&mut self, ticket_type_key: &TicketTypeKey) -> bool {
        let changed = self.ledger.decrease(ticket_type_key);
        self.persist_if(changed);
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.ledger.clear();
        self.persist_if(changed);
        changed
    }

    fn persist_if(&self, changed: bool) {
        if !changed {
            return;
        }
        if let Err(e) = save_state(self.storage.as_ref(), BASKET_STORAGE_KEY, &self.ledger) {
            warn!(error = %e, "Failed to persist basket");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn info(price: i64) -> TicketTypeInfo {
        TicketTypeInfo {
            id: "t1".to_string(),
            name: "Early Bird".to_string(),
            price: Some(Decimal::new(price, 0)),
            ..TicketTypeInfo::default()
        }
    }

    fn add_t1(store: &mut BasketStore) {
        store.add_item(
            TicketTypeKey::new("t1"),
            info(10),
            EventKey::new("ev-1"),
            "Summer Fest",
        );
    }

    #[test]
    fn test_basket_survives_reload() {
        let storage: Arc<dyn StateStore> = Arc::new(MemoryStore::new());

        let mut store = BasketStore::load(Arc::clone(&storage));
        add_t1(&mut store);
        add_t1(&mut store);

        let reloaded = BasketStore::load(storage);
        assert_eq!(reloaded.count(), 2);
        assert_eq!(reloaded.total(), Decimal::new(20, 0));
        assert_eq!(reloaded.items()[0].event_title, "Summer Fest");
    }

    #[test]
    fn test_zero_quantity_persists_removal() {
        let storage: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
        let mut store = BasketStore::load(Arc::clone(&storage));
        add_t1(&mut store);
        store.update_quantity(&TicketTypeKey::new("t1"), 0);

        assert_eq!(store.count(), 0);
        assert_eq!(BasketStore::load(storage).count(), 0);
    }

    #[test]
    fn test_unknown_persisted_fields_are_ignored() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .save(
                BASKET_STORAGE_KEY,
                r#"{"state":{"items":[{"ticketTypeKey":"t1","ticketInfo":{"id":"t1","price":5,"extra":1},"quantity":3,"eventKey":"ev","eventTitle":"E","future":true}],"other":1},"version":0}"#,
            )
            .unwrap();

        let store = BasketStore::load(storage);
        assert_eq!(store.count(), 3);
        assert_eq!(store.total(), Decimal::new(15, 0));
    }

    #[test]
    fn test_corrupt_state_starts_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.save(BASKET_STORAGE_KEY, "garbage").unwrap();
        assert_eq!(BasketStore::load(storage).count(), 0);
    }

    struct FailingStore;

    impl StateStore for FailingStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk full").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failure_does_not_fail_operations() {
        let mut store = BasketStore::load(Arc::new(FailingStore));
        add_t1(&mut store);
        store.increase(&TicketTypeKey::new("t1"));
        assert_eq!(store.count(), 2);
        store.clear();
        assert_eq!(store.count(), 0);
    }
}
