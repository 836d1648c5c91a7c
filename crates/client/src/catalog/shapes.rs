//! Response shapes the events endpoint is known to use.
//!
//! The endpoint has returned its event collection under several different
//! keys over time. Each known shape is an extractor; they are tried in the
//! order listed and the first one that yields an array wins.

use serde_json::Value;

/// A named extractor for one known response shape.
#[derive(Clone, Copy)]
pub struct ListShape {
    /// Dotted path describing where the array lives (for logging).
    pub name: &'static str,
    extract: fn(&Value) -> Option<&Vec<Value>>,
}

impl ListShape {
    /// Apply this extractor to a payload.
    #[must_use]
    pub fn extract<'a>(&self, payload: &'a Value) -> Option<&'a Vec<Value>> {
        (self.extract)(payload)
    }
}

impl std::fmt::Debug for ListShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListShape").field("name", &self.name).finish()
    }
}

/// Known shapes, highest priority first.
pub const EVENT_LIST_SHAPES: &[ListShape] = &[
    ListShape {
        name: "data.list",
        extract: data_list,
    },
    ListShape {
        name: "data.items",
        extract: data_items,
    },
    ListShape {
        name: "<root>",
        extract: Value::as_array,
    },
    ListShape {
        name: "items",
        extract: items,
    },
    ListShape {
        name: "results",
        extract: results,
    },
    ListShape {
        name: "events",
        extract: events,
    },
];

fn data_list(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("data")?.get("list")?.as_array()
}

fn data_items(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("data")?.get("items")?.as_array()
}

fn items(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("items")?.as_array()
}

fn results(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("results")?.as_array()
}

fn events(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("events")?.as_array()
}

/// Find the event array in a payload using [`EVENT_LIST_SHAPES`].
///
/// Returns the matching shape alongside the array, or `None` when no known
/// shape matches.
#[must_use]
pub fn find_event_list(payload: &Value) -> Option<(&'static ListShape, &Vec<Value>)> {
    EVENT_LIST_SHAPES
        .iter()
        .find_map(|shape| shape.extract(payload).map(|list| (shape, list)))
}

/// Top-level keys of a payload, for diagnostics.
#[must_use]
pub fn top_level_keys(payload: &Value) -> Vec<&str> {
    payload
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
