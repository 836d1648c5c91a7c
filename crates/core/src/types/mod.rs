//! Core types for ticketbox.
//!
//! This module provides the domain model shared by the client and the CLI.

pub mod basket;
pub mod event;
pub mod id;
pub mod price;
pub mod shop;
pub mod status;
pub mod theme;

pub use basket::{BasketLedger, LineItem};
pub use event::{Event, SortBy, SortByError, filter_and_sort, filter_events, sort_events};
pub use id::{EventKey, TicketTypeKey};
pub use price::{format_amount, format_price};
pub use shop::{ExpansionState, ShopTree, TicketGroup, TicketTypeInfo, TreeRow, render_tree};
pub use status::LoadStatus;
pub use theme::{ColorScheme, Theme};
