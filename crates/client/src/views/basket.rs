//! Basket screen.

use ticketbox_core::{BasketLedger, LineItem, format_amount};

use super::indent;

/// Renders the basket with per-line totals and the grand total.
#[derive(Debug, Clone, Copy)]
pub struct BasketView<'a> {
    ledger: &'a BasketLedger,
}

impl<'a> BasketView<'a> {
    #[must_use]
    pub const fn new(ledger: &'a BasketLedger) -> Self {
        Self { ledger }
    }

    #[must_use]
    pub fn render(&self) -> String {
        if self.ledger.is_empty() {
            return "Your basket is empty\nAdd tickets from event details to get started".to_string();
        }

        let count = self.ledger.count();
        let mut lines = vec![format!(
            "Basket ({count} {})",
            if count == 1 { "item" } else { "items" }
        )];
        for item in self.ledger.items() {
            lines.push(String::new());
            lines.extend(line_item(item));
        }
        lines.push(String::new());
        lines.push(format!("Total: {}", format_amount(self.ledger.total(), None)));
        lines.join("\n")
    }
}

fn line_item(item: &LineItem) -> [String; 3] {
    let info = &item.ticket_info;
    let currency = info.currency.as_deref();
    [
        format!("{}  ({})", info.display_name(), item.ticket_type_key),
        format!("{}{}", indent(1), item.event_title),
        format!(
            "{}{} each  x{}  = {}",
            indent(1),
            format_amount(info.unit_price(), currency),
            item.quantity,
            format_amount(item.line_total(), currency)
        ),
    ]
}
