//! Event list and event detail commands.

use ticketbox_client::AppState;
use ticketbox_client::error::{Error, add_breadcrumb};
use ticketbox_client::views::{EventDetailView, EventsListView};
use ticketbox_core::{EventKey, SortBy};
use tracing::info;

use super::{CliError, print};

/// Fetch the event list and print it.
///
/// # Errors
///
/// Returns an error if the list could not be loaded or printed. The error
/// view is printed before returning.
pub async fn list(state: &AppState, search: &str, sort: SortBy) -> Result<(), CliError> {
    let events = state.events();
    events.fetch().await;
    let snapshot = events.snapshot();

    let view = EventsListView::new(search, sort);
    print(&view.render(&snapshot, state.catalog()))?;

    if let Some(error) = snapshot.error {
        return Err(CliError::EventsUnavailable(error));
    }
    info!(
        total = snapshot.events.len(),
        shown = view.visible(&snapshot.events).len(),
        "Listed events"
    );
    Ok(())
}

/// Print the ticket tree of one event.
///
/// # Errors
///
/// Returns an error if the shop cannot be loaded or a toggled group does
/// not exist.
pub async fn show(
    state: &AppState,
    event_key: &str,
    title: Option<&str>,
    toggles: &[i64],
) -> Result<(), CliError> {
    let event_key = EventKey::new(event_key);
    add_breadcrumb("events", "Viewed event", Some(&[("event_key", event_key.as_str())]));

    let mut view =
        EventDetailView::load(state.catalog(), &event_key, title.unwrap_or_default()).await?;

    for &group_id in toggles {
        if view.shop().find_group(group_id).is_none() {
            return Err(Error::NotFound(format!("Group {group_id} in event {event_key}")).into());
        }
        view.toggle_group(group_id);
    }

    let basket = state.basket_store();
    print(&view.render(basket.ledger()))
}
