//! Text views for the screens of the app.
//!
//! Each view owns the screen-local state (search query, expanded groups,
//! scan guard) and renders itself to plain text from the shared stores.
//! Actions that would pop a toast return a [`Notice`] instead; showing it
//! is up to the caller.

mod basket;
mod event_card;
mod event_detail;
mod events_list;
mod scanner;

pub use basket::BasketView;
pub use event_card::EventCard;
pub use event_detail::{ADDED_TO_BASKET, EventDetailView};
pub use events_list::EventsListView;
pub use scanner::{CameraFacing, CameraPermission, QR_CODE_SCANNED, ScanOutcome, Scanner};

/// Indentation unit for nested rows.
const INDENT: &str = "  ";

/// Success feedback produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Screen to show after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Events,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Events => write!(f, "events"),
        }
    }
}

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}
