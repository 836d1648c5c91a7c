//! Basket ledger: the local list of tickets a user intends to buy.
//!
//! The ledger holds at most one line item per ticket type and never holds
//! an item with quantity below one. None of its operations can fail; an
//! unknown key or a non-positive quantity degrades to a no-op or a removal.
//! Every mutation reports whether the ledger actually changed so callers
//! can skip persisting unchanged state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{EventKey, TicketTypeKey};
use super::shop::TicketTypeInfo;

/// One ticket type in the basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub ticket_type_key: TicketTypeKey,
    /// Snapshot taken on first add. Later catalog changes do not touch it.
    pub ticket_info: TicketTypeInfo,
    pub quantity: u32,
    pub event_key: EventKey,
    #[serde(default)]
    pub event_title: String,
}

impl LineItem {
    /// Unit price × quantity, with a missing price counted as zero.
    /// Saturates at the `Decimal` bounds instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.ticket_info
            .unit_price()
            .saturating_mul(Decimal::from(self.quantity))
    }
}

fn sum_saturating<'a>(items: impl Iterator<Item = &'a LineItem>) -> Decimal {
    items
        .map(LineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// In-memory basket contents in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketLedger {
    #[serde(default)]
    items: Vec<LineItem>,
}

impl BasketLedger {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a ledger from persisted items, restoring the invariants:
    /// zero-quantity items are dropped and duplicate keys are merged into
    /// the first occurrence.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut ledger = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match ledger.position(&item.ticket_type_key) {
                Some(index) => {
                    if let Some(existing) = ledger.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => ledger.items.push(item),
            }
        }
        ledger
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, ticket_type_key: &TicketTypeKey) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| &item.ticket_type_key == ticket_type_key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn position(&self, ticket_type_key: &TicketTypeKey) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.ticket_type_key == ticket_type_key)
    }

    /// Add one ticket of the given type.
    ///
    /// An existing line is incremented and keeps its original snapshot;
    /// otherwise a new line with quantity 1 is appended.
    pub fn add_item(
        &mut self,
        ticket_type_key: TicketTypeKey,
        ticket_info: TicketTypeInfo,
        event_key: EventKey,
        event_title: impl Into<String>,
    ) -> bool {
        if let Some(index) = self.position(&ticket_type_key)
            && let Some(item) = self.items.get_mut(index)
        {
            item.quantity = item.quantity.saturating_add(1);
            return true;
        }

        self.items.push(LineItem {
            ticket_type_key,
            ticket_info,
            quantity: 1,
            event_key,
            event_title: event_title.into(),
        });
        true
    }

    /// Remove a line. Absent keys are ignored.
    pub fn remove_item(&mut self, ticket_type_key: &TicketTypeKey) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| &item.ticket_type_key != ticket_type_key);
        self.items.len() != before
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Unknown keys are ignored.
    pub fn update_quantity(&mut self, ticket_type_key: &TicketTypeKey, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            return self.set_quantity(ticket_type_key, u32::MAX);
        };
        if quantity == 0 {
            return self.remove_item(ticket_type_key);
        }
        self.set_quantity(ticket_type_key, quantity)
    }

    fn set_quantity(&mut self, ticket_type_key: &TicketTypeKey, quantity: u32) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| &item.ticket_type_key == ticket_type_key)
        {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Increase a line by one. Unknown keys are ignored.
    pub fn increase(&mut self, ticket_type_key: &TicketTypeKey) -> bool {
        match self.get(ticket_type_key) {
            Some(item) => {
                let next = i64::from(item.quantity) + 1;
                self.update_quantity(ticket_type_key, next)
            }
            None => false,
        }
    }

    /// Decrease a line by one, removing it when it would drop to zero.
    pub fn decrease(&mut self, ticket_type_key: &TicketTypeKey) -> bool {
        match self.get(ticket_type_key) {
            Some(item) => {
                let next = i64::from(item.quantity) - 1;
                self.update_quantity(ticket_type_key, next)
            }
            None => false,
        }
    }

    /// Empty the ledger.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Σ(unit price × quantity) over all lines, saturating.
    #[must_use]
    pub fn total(&self) -> Decimal {
        sum_saturating(self.items.iter())
    }

    /// Σ(quantity) over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Lines belonging to one event, in basket order.
    pub fn items_for_event<'a>(
        &'a self,
        event_key: &'a EventKey,
    ) -> impl Iterator<Item = &'a LineItem> + 'a {
        self.items
            .iter()
            .filter(move |item| &item.event_key == event_key)
    }

    /// Total for the lines belonging to one event.
    #[must_use]
    pub fn event_total(&self, event_key: &EventKey) -> Decimal {
        sum_saturating(self.items_for_event(event_key))
    }

    /// Ticket count for the lines belonging to one event.
    #[must_use]
    pub fn event_count(&self, event_key: &EventKey) -> u64 {
        self.items_for_event(event_key)
            .map(|item| u64::from(item.quantity))
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn info(id: &str, price: Option<i64>) -> TicketTypeInfo {
        TicketTypeInfo {
            id: id.to_string(),
            name: format!("Test Ticket {id}"),
            price: price.map(|p| Decimal::new(p, 0)),
            currency: Some("EUR".to_string()),
            ..TicketTypeInfo::default()
        }
    }

    fn add(ledger: &mut BasketLedger, key: &str, price: Option<i64>) {
        ledger.add_item(
            TicketTypeKey::new(key),
            info(key, price),
            EventKey::new("event-1"),
            "Test Event",
        );
    }

    fn key(k: &str) -> TicketTypeKey {
        TicketTypeKey::new(k)
    }

    #[test]
    fn test_add_new_item() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.items()[0].ticket_type_key, key("ticket-1"));
        assert_eq!(ledger.items()[0].quantity, 1);
        assert_eq!(ledger.count(), 1);
    }

    #[test]
    fn test_repeated_add_increments() {
        let mut ledger = BasketLedger::new();
        for _ in 0..5 {
            add(&mut ledger, "ticket-1", Some(10));
        }
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.items()[0].quantity, 5);
        assert_eq!(ledger.count(), 5);
    }

    #[test]
    fn test_add_keeps_original_snapshot() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));
        ledger.add_item(
            key("ticket-1"),
            info("ticket-1", Some(99)),
            EventKey::new("event-1"),
            "Test Event",
        );

        assert_eq!(ledger.items()[0].ticket_info.price, Some(Decimal::new(10, 0)));
        assert_eq!(ledger.total(), Decimal::new(20, 0));
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));

        assert!(ledger.update_quantity(&key("ticket-1"), 3));
        assert!(ledger.update_quantity(&key("ticket-1"), 5));
        assert_eq!(ledger.items()[0].quantity, 5);

        assert!(ledger.update_quantity(&key("ticket-1"), 2));
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));
        add(&mut ledger, "ticket-2", Some(20));

        ledger.update_quantity(&key("ticket-1"), 0);
        assert!(ledger.get(&key("ticket-1")).is_none());

        ledger.update_quantity(&key("ticket-2"), -1);
        assert!(ledger.is_empty());
        assert_eq!(ledger.count(), 0);
    }

    #[test]
    fn test_update_quantity_unknown_key_is_noop() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));

        assert!(!ledger.update_quantity(&key("nope"), 4));
        assert_eq!(ledger.count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));
        add(&mut ledger, "ticket-2", Some(20));

        assert!(ledger.remove_item(&key("ticket-1")));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.items()[0].ticket_type_key, key("ticket-2"));
        assert_eq!(ledger.count(), 1);

        assert!(!ledger.remove_item(&key("ticket-1")));
    }

    #[test]
    fn test_total_single_and_multiple() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));
        assert_eq!(ledger.total(), Decimal::new(10, 0));

        add(&mut ledger, "ticket-2", Some(20));
        assert_eq!(ledger.total(), Decimal::new(30, 0));

        ledger.update_quantity(&key("ticket-1"), 3);
        assert_eq!(ledger.total(), Decimal::new(50, 0));
        assert_eq!(ledger.count(), 4);
    }

    #[test]
    fn test_free_ticket_contributes_zero() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-free", None);
        add(&mut ledger, "ticket-free", None);
        assert_eq!(ledger.total(), Decimal::ZERO);
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn test_total_saturates_on_huge_amounts() {
        let mut ledger = BasketLedger::new();
        for k in ["ticket-1", "ticket-2"] {
            ledger.add_item(
                key(k),
                TicketTypeInfo {
                    price: Some(Decimal::MAX),
                    ..info(k, None)
                },
                EventKey::new("event-1"),
                "Test Event",
            );
            ledger.update_quantity(&key(k), i64::from(u32::MAX));
        }

        assert_eq!(ledger.items()[0].line_total(), Decimal::MAX);
        assert_eq!(ledger.total(), Decimal::MAX);
        assert_eq!(ledger.event_total(&EventKey::new("event-1")), Decimal::MAX);
        assert_eq!(ledger.count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_clear() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "ticket-1", Some(10));
        add(&mut ledger, "ticket-2", Some(20));

        assert!(ledger.clear());
        assert!(ledger.is_empty());
        assert_eq!(ledger.count(), 0);
        assert_eq!(ledger.total(), Decimal::ZERO);
        assert!(!ledger.clear());
    }

    #[test]
    fn test_add_twice_then_zero_quantity() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "t1", Some(10));
        add(&mut ledger, "t1", Some(10));
        assert_eq!(ledger.count(), 2);
        assert_eq!(ledger.total(), Decimal::new(20, 0));

        ledger.update_quantity(&key("t1"), 0);
        assert_eq!(ledger.count(), 0);
    }

    #[test]
    fn test_decrease_from_one_removes() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "t1", Some(10));
        assert!(ledger.increase(&key("t1")));
        assert_eq!(ledger.count(), 2);

        assert!(ledger.decrease(&key("t1")));
        assert!(ledger.decrease(&key("t1")));
        assert!(ledger.is_empty());
        assert!(!ledger.decrease(&key("t1")));
    }

    #[test]
    fn test_event_summary() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "t1", Some(10));
        ledger.add_item(
            key("t9"),
            info("t9", Some(7)),
            EventKey::new("event-2"),
            "Other Event",
        );
        ledger.update_quantity(&key("t1"), 2);

        let event = EventKey::new("event-1");
        assert_eq!(ledger.items_for_event(&event).count(), 1);
        assert_eq!(ledger.event_total(&event), Decimal::new(20, 0));
        assert_eq!(ledger.event_count(&event), 2);
        assert_eq!(ledger.event_total(&EventKey::new("event-2")), Decimal::new(7, 0));
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let mut ledger = BasketLedger::new();
        add(&mut ledger, "t1", Some(10));
        add(&mut ledger, "t2", Some(5));
        let mut items = ledger.items().to_vec();
        items.push(items[0].clone());
        items[1].quantity = 0;

        let restored = BasketLedger::from_items(items);
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.items()[0].quantity, 2);
    }

    #[test]
    fn test_line_item_tolerates_missing_optional_fields() {
        let json = r#"{
            "ticketTypeKey": "t1",
            "ticketInfo": {"id": "t1"},
            "quantity": 2,
            "eventKey": "ev"
        }"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.event_title, "");
        assert_eq!(item.line_total(), Decimal::ZERO);
    }
}
