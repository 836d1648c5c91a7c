//! Searchable, sortable events list.

use ticketbox_core::{Event, LoadStatus, SortBy, filter_and_sort};

use super::EventCard;
use crate::catalog::CatalogClient;
use crate::stores::EventsSnapshot;

/// Search and sort state of the events screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsListView {
    query: String,
    sort_by: SortBy,
}

impl EventsListView {
    #[must_use]
    pub fn new(query: impl Into<String>, sort_by: SortBy) -> Self {
        Self {
            query: query.into(),
            sort_by,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub const fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub const fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Events to show, filtered by the query and sorted.
    #[must_use]
    pub fn visible<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        filter_and_sort(events, &self.query, self.sort_by)
    }

    #[must_use]
    pub fn render(&self, snapshot: &EventsSnapshot, client: &CatalogClient) -> String {
        if snapshot.status == LoadStatus::Loading && snapshot.events.is_empty() {
            return "Loading events...".to_string();
        }
        if let Some(error) = &snapshot.error {
            return format!("{error}\nRetry to load events again.");
        }

        let visible = self.visible(&snapshot.events);
        if visible.is_empty() {
            return if snapshot.events.is_empty() {
                "No events found".to_string()
            } else {
                "No events match your search".to_string()
            };
        }

        let mut lines = vec![format!(
            "{} events (sorted by {})",
            visible.len(),
            self.sort_by
        )];
        for event in visible {
            lines.push(String::new());
            lines.extend(EventCard::new(event, client).lines());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use ticketbox_core::EventKey;

    fn client() -> CatalogClient {
        CatalogClient::new(&CatalogConfig::default()).unwrap()
    }

    fn event(key: &str, title: &str, date: &str, location: &str) -> Event {
        Event {
            key: EventKey::new(key),
            title: title.to_string(),
            start_date: Some(date.to_string()),
            location: Some(location.to_string()),
            ..Event::default()
        }
    }

    fn loaded(events: Vec<Event>) -> EventsSnapshot {
        EventsSnapshot {
            status: LoadStatus::Loaded,
            events,
            error: None,
        }
    }

    #[test]
    fn test_loading_state() {
        let snapshot = EventsSnapshot {
            status: LoadStatus::Loading,
            ..EventsSnapshot::default()
        };
        assert_eq!(
            EventsListView::default().render(&snapshot, &client()),
            "Loading events..."
        );
    }

    #[test]
    fn test_error_state_has_retry_hint() {
        let snapshot = EventsSnapshot {
            status: LoadStatus::Error,
            events: Vec::new(),
            error: Some("API error: 500 - boom".to_string()),
        };
        let rendered = EventsListView::default().render(&snapshot, &client());
        assert!(rendered.starts_with("API error: 500 - boom"));
        assert!(rendered.contains("Retry"));
    }

    #[test]
    fn test_empty_states() {
        let view = EventsListView::new("zzz", SortBy::Date);
        assert_eq!(view.render(&loaded(Vec::new()), &client()), "No events found");

        let snapshot = loaded(vec![event("a", "Jazz", "2025-01-01", "Utrecht")]);
        assert_eq!(
            view.render(&snapshot, &client()),
            "No events match your search"
        );
    }

    #[test]
    fn test_renders_sorted_cards() {
        let snapshot = loaded(vec![
            event("a", "Older", "2024-06-01", "Utrecht"),
            event("b", "Newer", "2025-06-01", "Amsterdam"),
        ]);
        let view = EventsListView::default();
        let rendered = view.render(&snapshot, &client());

        assert!(rendered.starts_with("2 events (sorted by date)"));
        let newer = rendered.find("Newer").unwrap();
        let older = rendered.find("Older").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_query_filters_by_location() {
        let events = vec![
            event("a", "Jazz", "2025-01-01", "Utrecht"),
            event("b", "Rock", "2025-01-02", "Amsterdam"),
        ];
        let mut view = EventsListView::default();
        view.set_query("  amster ");
        let visible = view.visible(&events);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().title, "Rock");
    }
}
