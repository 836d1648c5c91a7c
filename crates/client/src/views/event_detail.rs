//! Event detail screen: the ticket tree and the event's basket summary.

use ticketbox_core::{
    BasketLedger, EventKey, ExpansionState, ShopTree, TicketTypeKey, TreeRow, format_amount,
    format_price, render_tree,
};
use tracing::debug;

use super::{Notice, indent};
use crate::catalog::{CatalogClient, CatalogError};
use crate::stores::BasketStore;

/// Notice title shown after a ticket is added.
pub const ADDED_TO_BASKET: &str = "Added to basket";

/// Shop tree of one event plus which groups are expanded.
#[derive(Debug, Clone)]
pub struct EventDetailView {
    event_key: EventKey,
    event_title: String,
    shop: ShopTree,
    expansion: ExpansionState,
}

impl EventDetailView {
    /// View over an already loaded shop. An empty `event_title` falls back
    /// to the shop title.
    #[must_use]
    pub fn new(shop: ShopTree, event_title: impl Into<String>) -> Self {
        let mut event_title = event_title.into();
        if event_title.is_empty() {
            event_title.clone_from(&shop.title);
        }
        Self {
            event_key: shop.key.clone(),
            event_title,
            expansion: ExpansionState::from_shop(&shop),
            shop,
        }
    }

    /// Fetch the shop for `event_key` and build the view.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the shop cannot be loaded.
    pub async fn load(
        client: &CatalogClient,
        event_key: &EventKey,
        event_title: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let shop = client.get_shop(event_key).await?;
        Ok(Self::new(shop, event_title))
    }

    #[must_use]
    pub const fn event_key(&self) -> &EventKey {
        &self.event_key
    }

    #[must_use]
    pub fn event_title(&self) -> &str {
        &self.event_title
    }

    #[must_use]
    pub const fn shop(&self) -> &ShopTree {
        &self.shop
    }

    #[must_use]
    pub const fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Expand or collapse one group. Returns the new expanded state.
    pub fn toggle_group(&mut self, group_id: i64) -> bool {
        self.expansion.toggle(group_id)
    }

    /// Currently visible rows.
    #[must_use]
    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        render_tree(&self.shop, &self.expansion)
    }

    /// Add one ticket of a type from this shop to the basket.
    ///
    /// Returns `None` when the key is not in the shop's dictionary.
    pub fn add_ticket(
        &self,
        ticket_type_key: &TicketTypeKey,
        basket: &mut BasketStore,
    ) -> Option<Notice> {
        let Some(info) = self.shop.ticket(ticket_type_key.as_str()) else {
            debug!(ticket_type_key = %ticket_type_key, "Ticket type not in shop");
            return None;
        };

        let mut snapshot = info.clone();
        if snapshot.currency.is_none() {
            snapshot.currency.clone_from(&self.shop.currency);
        }
        let name = snapshot.display_name().to_string();

        basket.add_item(
            ticket_type_key.clone(),
            snapshot,
            self.event_key.clone(),
            self.event_title.clone(),
        );
        Some(Notice::success(ADDED_TO_BASKET, name))
    }

    /// Render the title, the basket summary (when this event has lines in
    /// the basket) and the ticket tree.
    #[must_use]
    pub fn render(&self, basket: &BasketLedger) -> String {
        let mut lines = vec![self.event_title.clone()];

        let count = basket.event_count(&self.event_key);
        if count > 0 {
            let total = basket.event_total(&self.event_key);
            lines.push(String::new());
            lines.push("Basket Summary".to_string());
            lines.push(format!(
                "{count} {} · Total: {}",
                if count == 1 { "ticket" } else { "tickets" },
                format_amount(total, None)
            ));
        }

        lines.push(String::new());
        if self.shop.is_empty() {
            lines.push("No tickets available".to_string());
            return lines.join("\n");
        }

        for row in self.rows() {
            lines.push(render_row(&row));
        }
        lines.join("\n")
    }
}

fn render_row(row: &TreeRow<'_>) -> String {
    match row {
        TreeRow::Group {
            id,
            name,
            depth,
            expanded,
        } => {
            let marker = if *expanded { '▼' } else { '▶' };
            format!("{}{marker} {name} [{id}]", indent(*depth))
        }
        TreeRow::Ticket {
            key,
            info,
            currency,
            depth,
        } => {
            let mut line = format!(
                "{}- {}  {}  ({key})",
                indent(*depth),
                info.display_name(),
                format_price(info.price, *currency)
            );
            if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
                line.push('\n');
                line.push_str(&indent(depth + 1));
                line.push_str(description);
            }
            line
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use ticketbox_core::{TicketGroup, TicketTypeInfo};

    use super::*;
    use crate::storage::MemoryStore;

    fn ticket(id: &str, name: &str, price: Option<i64>) -> TicketTypeInfo {
        TicketTypeInfo {
            id: id.to_string(),
            name: name.to_string(),
            price: price.map(|p| Decimal::new(p, 0)),
            ..TicketTypeInfo::default()
        }
    }

    fn shop() -> ShopTree {
        let mut dictionary = HashMap::new();
        dictionary.insert("t1".to_string(), ticket("t1", "Early Bird", Some(10)));
        dictionary.insert("t2".to_string(), ticket("t2", "Guest List", None));
        dictionary.insert("t3".to_string(), ticket("t3", "VIP", Some(50)));

        ShopTree {
            key: EventKey::new("ev-1"),
            title: "Summer Fest".to_string(),
            children: vec![
                TicketGroup {
                    id: 1,
                    name: "Regular".to_string(),
                    ticket_types: vec!["t1".to_string(), "t2".to_string(), "gone".to_string()],
                    ..TicketGroup::default()
                },
                TicketGroup {
                    id: 2,
                    name: "Premium".to_string(),
                    collapsed: true,
                    ticket_types: vec!["t3".to_string()],
                    ..TicketGroup::default()
                },
            ],
            ticket_type_dictionary: dictionary,
            currency: Some("EUR".to_string()),
        }
    }

    fn basket() -> BasketStore {
        BasketStore::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_title_falls_back_to_shop() {
        assert_eq!(EventDetailView::new(shop(), "").event_title(), "Summer Fest");
        assert_eq!(EventDetailView::new(shop(), "Given").event_title(), "Given");
    }

    #[test]
    fn test_render_tree() {
        let view = EventDetailView::new(shop(), "Summer Fest");
        let rendered = view.render(&BasketLedger::new());
        assert_eq!(
            rendered,
            "Summer Fest\n\
             \n\
             ▼ Regular [1]\n\
             \x20 - Early Bird  €10.00  (t1)\n\
             \x20 - Guest List  Free  (t2)\n\
             ▶ Premium [2]"
        );
    }

    #[test]
    fn test_toggle_reveals_collapsed_group() {
        let mut view = EventDetailView::new(shop(), "Summer Fest");
        assert!(view.toggle_group(2));
        let rendered = view.render(&BasketLedger::new());
        assert!(rendered.contains("▼ Premium [2]"));
        assert!(rendered.contains("VIP  €50.00"));
    }

    #[test]
    fn test_empty_shop() {
        let empty = ShopTree {
            key: EventKey::new("ev-2"),
            ..ShopTree::default()
        };
        let rendered = EventDetailView::new(empty, "Nothing").render(&BasketLedger::new());
        assert!(rendered.ends_with("No tickets available"));
    }

    #[test]
    fn test_add_ticket_updates_summary() {
        let view = EventDetailView::new(shop(), "Summer Fest");
        let mut basket = basket();

        let notice = view
            .add_ticket(&TicketTypeKey::new("t1"), &mut basket)
            .unwrap();
        assert_eq!(notice.title, ADDED_TO_BASKET);
        assert_eq!(notice.message, "Early Bird");

        view.add_ticket(&TicketTypeKey::new("t1"), &mut basket);
        view.add_ticket(&TicketTypeKey::new("t2"), &mut basket);

        let rendered = view.render(basket.ledger());
        assert!(rendered.contains("Basket Summary\n3 tickets · Total: €20.00"));

        let line = basket.items().first().unwrap();
        assert_eq!(line.event_title, "Summer Fest");
        assert_eq!(line.ticket_info.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_add_unknown_ticket() {
        let view = EventDetailView::new(shop(), "Summer Fest");
        let mut basket = basket();
        assert!(view
            .add_ticket(&TicketTypeKey::new("gone"), &mut basket)
            .is_none());
        assert_eq!(basket.count(), 0);
    }
}
