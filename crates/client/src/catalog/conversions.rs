//! Conversions from raw API payloads to domain types.
//!
//! The API uses `name` where the client shows `title`, and ships cover
//! images as `files/<guid>` paths. Both are normalized here.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use ticketbox_core::types::shop::null_as_default;
use ticketbox_core::{Event, EventKey, ShopTree, TicketGroup, TicketTypeInfo};

const IMAGE_PATH_PREFIX: &str = "files/";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    sqid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShop {
    #[serde(default)]
    sqid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    children: Vec<TicketGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    ticket_type_dictionary: HashMap<String, TicketTypeInfo>,
    #[serde(default)]
    currency: Option<String>,
}

/// Why a raw event record was rejected.
#[derive(Debug, thiserror::Error)]
pub enum EventRecordError {
    #[error("malformed event record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("event record has no sqid")]
    MissingKey,
}

/// First non-empty string among the candidates.
fn first_non_empty(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Derive the image GUID from an image path like `files/<guid>`.
#[must_use]
pub fn image_guid(path: &str) -> Option<String> {
    let guid = path.strip_prefix(IMAGE_PATH_PREFIX).unwrap_or(path);
    (!guid.is_empty()).then(|| guid.to_string())
}

/// Convert one raw event record.
///
/// # Errors
///
/// Returns an error if the record does not look like an event or has no key.
pub fn convert_event(record: &Value) -> Result<Event, EventRecordError> {
    let raw = RawEvent::deserialize(record)?;
    let key = first_non_empty([raw.sqid]).ok_or(EventRecordError::MissingKey)?;

    Ok(Event {
        key: EventKey::new(key),
        id: raw.id.as_ref().and_then(Value::as_i64),
        title: first_non_empty([raw.name, raw.title]).unwrap_or_default(),
        start_date: first_non_empty([raw.start_date]),
        end_date: first_non_empty([raw.end_date]),
        location: raw.location,
        city: raw.city,
        short_description: raw.short_description,
        cover_image: raw
            .image
            .and_then(|image| image.path)
            .and_then(|path| image_guid(&path)),
    })
}

/// Convert a raw shop payload.
///
/// The shop title comes from `name`, falling back to `title`. Dictionary
/// entries without an `id` take their dictionary key.
///
/// # Errors
///
/// Returns an error if the payload is not a shop object.
pub fn convert_shop(payload: Value, event_key: &EventKey) -> Result<ShopTree, serde_json::Error> {
    let raw: RawShop = serde_json::from_value(payload)?;

    let ticket_type_dictionary = raw
        .ticket_type_dictionary
        .into_iter()
        .map(|(key, mut info)| {
            if info.id.is_empty() {
                info.id.clone_from(&key);
            }
            (key, info)
        })
        .collect();

    Ok(ShopTree {
        key: first_non_empty([raw.sqid]).map_or_else(|| event_key.clone(), EventKey::new),
        title: first_non_empty([raw.name, raw.title]).unwrap_or_default(),
        children: raw.children,
        ticket_type_dictionary,
        currency: raw.currency,
    })
}
