//! Basket commands.
//!
//! Every command prints the basket afterwards. Keys that are not in the
//! basket are reported as errors instead of silently ignored.

use ticketbox_client::AppState;
use ticketbox_client::error::{Error, add_breadcrumb};
use ticketbox_client::stores::BasketStore;
use ticketbox_client::views::{BasketView, EventDetailView};
use ticketbox_core::{EventKey, TicketTypeKey};

use super::{CliError, print};

fn print_basket(basket: &BasketStore) -> Result<(), CliError> {
    print(&BasketView::new(basket.ledger()).render())
}

fn not_in_basket(key: &TicketTypeKey) -> CliError {
    Error::NotFound(format!("Ticket type {key} is not in the basket")).into()
}

/// Print the basket.
///
/// # Errors
///
/// Returns an error if printing fails.
pub fn show(state: &AppState) -> Result<(), CliError> {
    print_basket(&state.basket_store())
}

/// Add one ticket of a type from an event's shop.
///
/// # Errors
///
/// Returns an error if the shop cannot be loaded or does not offer the
/// ticket type.
pub async fn add(state: &AppState, event_key: &str, ticket_type_key: &str) -> Result<(), CliError> {
    let event_key = EventKey::new(event_key);
    let ticket_type_key = TicketTypeKey::new(ticket_type_key);

    let view = EventDetailView::load(state.catalog(), &event_key, "").await?;
    let mut basket = state.basket_store();

    let notice = view.add_ticket(&ticket_type_key, &mut basket).ok_or_else(|| {
        Error::NotFound(format!(
            "Ticket type {ticket_type_key} in event {event_key}"
        ))
    })?;
    add_breadcrumb(
        "basket",
        "Added ticket",
        Some(&[
            ("event_key", event_key.as_str()),
            ("ticket_type_key", ticket_type_key.as_str()),
        ]),
    );

    print(&notice.to_string())?;
    print_basket(&basket)
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the key is not in the basket.
pub fn remove(state: &AppState, ticket_type_key: &str) -> Result<(), CliError> {
    let key = TicketTypeKey::new(ticket_type_key);
    let mut basket = state.basket_store();
    if !basket.remove_item(&key) {
        return Err(not_in_basket(&key));
    }
    print_basket(&basket)
}

/// Set a line's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns an error if the key is not in the basket.
pub fn set(state: &AppState, ticket_type_key: &str, quantity: i64) -> Result<(), CliError> {
    let key = TicketTypeKey::new(ticket_type_key);
    let mut basket = state.basket_store();
    if basket.ledger().get(&key).is_none() {
        return Err(not_in_basket(&key));
    }
    basket.update_quantity(&key, quantity);
    print_basket(&basket)
}

/// Increase a line's quantity by one.
///
/// # Errors
///
/// Returns an error if the key is not in the basket.
pub fn increase(state: &AppState, ticket_type_key: &str) -> Result<(), CliError> {
    let key = TicketTypeKey::new(ticket_type_key);
    let mut basket = state.basket_store();
    if !basket.increase(&key) {
        return Err(not_in_basket(&key));
    }
    print_basket(&basket)
}

/// Decrease a line's quantity by one, removing it at zero.
///
/// # Errors
///
/// Returns an error if the key is not in the basket.
pub fn decrease(state: &AppState, ticket_type_key: &str) -> Result<(), CliError> {
    let key = TicketTypeKey::new(ticket_type_key);
    let mut basket = state.basket_store();
    if !basket.decrease(&key) {
        return Err(not_in_basket(&key));
    }
    print_basket(&basket)
}

/// Empty the basket.
///
/// # Errors
///
/// Returns an error if printing fails.
pub fn clear(state: &AppState) -> Result<(), CliError> {
    let mut basket = state.basket_store();
    basket.clear();
    print_basket(&basket)
}
