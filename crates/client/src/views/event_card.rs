//! One event entry in the events list.

use ticketbox_core::Event;
use ticketbox_core::types::event::format_event_date;

use crate::catalog::CatalogClient;

/// Summary of one event in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard<'a> {
    pub event: &'a Event,
    pub date: String,
    pub image_url: Option<String>,
}

impl<'a> EventCard<'a> {
    #[must_use]
    pub fn new(event: &'a Event, client: &CatalogClient) -> Self {
        Self {
            event,
            date: format_event_date(event.start_date.as_deref()),
            image_url: event
                .cover_image
                .as_deref()
                .map(|guid| client.image_url(guid)),
        }
    }

    /// Card lines: title, then date and location, then the image link.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.event.title.clone()];

        let meta: Vec<&str> = [Some(self.date.as_str()), self.event.location.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if !meta.is_empty() {
            lines.push(format!("  {}", meta.join(" · ")));
        }
        if let Some(url) = &self.image_url {
            lines.push(format!("  {url}"));
        }
        lines.push(format!("  key: {}", self.event.key));
        lines
    }
}
