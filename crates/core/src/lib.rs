//! ticketbox core - Shared domain types.
//!
//! This crate provides the types used across all ticketbox components:
//! - `client` - Catalog API client, persisted stores and text views
//! - `cli` - Command-line front-end (`tbx`)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! persistence, no HTTP clients. Everything here can be tested without a
//! network or a storage backend.
//!
//! # Modules
//!
//! - [`types`] - Basket ledger, events and list rules, ticket shop trees,
//!   price formatting, themes and string keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
