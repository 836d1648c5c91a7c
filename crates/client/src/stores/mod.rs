//! Client-side state holders.
//!
//! - [`BasketStore`] - basket ledger, persisted after each change
//! - [`ThemeStore`] - color scheme preference, persisted
//! - [`EventsCache`] - remote event list with load status, shared

mod basket;
mod events;
mod theme;

pub use basket::{BASKET_STORAGE_KEY, BasketStore};
pub use events::{EventsCache, EventsSnapshot};
pub use theme::{THEME_STORAGE_KEY, ThemeStore};
