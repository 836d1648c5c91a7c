//! Integration tests for ticketbox.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ticketbox-integration-tests
//! ```
//!
//! Every test starts its own `wiremock` server, so nothing external is
//! needed.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP behaviour of the catalog client
//! - `events_cache` - load status and the concurrent fetch guard
//! - `basket_persistence` - basket and theme surviving a restart
//!
//! This library holds the fixtures they share.

use std::time::Duration;

use serde_json::{Value, json};
use ticketbox_client::catalog::CatalogClient;
use ticketbox_client::config::CatalogConfig;

/// Sales channel used by [`config_for`].
pub const CHANNEL: &str = "56wpw";

/// Events endpoint path used by [`config_for`].
pub const EVENTS_PATH: &str = "/v2/consumers/Events";

/// Catalog configuration pointing at a mock server, with the shop cache on.
#[must_use]
pub fn config_for(base_url: &str) -> CatalogConfig {
    CatalogConfig {
        timeout: Duration::from_secs(5),
        ..CatalogConfig::with_base_url(base_url)
    }
}

/// Catalog client pointing at a mock server.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client_for(base_url: &str) -> CatalogClient {
    CatalogClient::new(&config_for(base_url)).expect("Failed to create catalog client")
}

/// Shop path for an event under [`config_for`].
#[must_use]
pub fn shop_path(event_key: &str) -> String {
    format!("/shop/v2/{CHANNEL}/{event_key}")
}

/// Four events with distinct dates, titles and locations.
#[must_use]
pub fn event_records() -> Value {
    json!([
        {
            "sqid": "ev-a",
            "name": "Concert A",
            "startDate": "2025-01-15T20:00:00Z",
            "location": "Venue A",
            "image": {"path": "files/img-a"}
        },
        {
            "sqid": "ev-b",
            "name": "Festival B",
            "startDate": "2025-03-20T12:00:00Z",
            "location": "Park B"
        },
        {
            "sqid": "ev-c",
            "name": "Show C",
            "startDate": "2024-11-05T19:30:00Z",
            "location": "Venue A"
        },
        {
            "sqid": "ev-d",
            "name": "Theater D",
            "startDate": "2025-02-01T18:00:00Z",
            "location": "Hall D"
        }
    ])
}

/// Shop with one open group (two tickets, one free) and one collapsed
/// group holding a nested child.
#[must_use]
pub fn shop_payload(event_key: &str) -> Value {
    json!({
        "sqid": event_key,
        "name": "Summer Fest",
        "currency": "EUR",
        "children": [
            {
                "id": 1,
                "name": "Regular",
                "type": "group",
                "collapsed": false,
                "ticketTypes": ["t1", "t2"],
                "children": null
            },
            {
                "id": 2,
                "name": "Premium",
                "type": "group",
                "collapsed": true,
                "ticketTypes": ["t3"],
                "children": [
                    {
                        "id": 3,
                        "name": "Backstage",
                        "collapsed": false,
                        "ticketTypes": ["t4"]
                    }
                ]
            }
        ],
        "ticketTypeDictionary": {
            "t1": {"id": "t1", "name": "Early Bird", "price": 10},
            "t2": {"id": "t2", "name": "Guest List", "price": null},
            "t3": {"id": "t3", "name": "VIP", "price": "49.50"},
            "t4": {"name": "Backstage Pass", "price": 120, "currency": "USD"}
        }
    })
}
