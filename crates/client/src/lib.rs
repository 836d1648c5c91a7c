//! ticketbox client library.
//!
//! Everything with I/O or process state: the catalog API client, the
//! persistence port, the client-side stores and the text views built on
//! top of them. Domain types live in `ticketbox-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod stores;
pub mod views;

pub use error::{Error, Result};
pub use state::AppState;
