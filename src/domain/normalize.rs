// src/domain/normalize.rs

//! Maps raw records from either origin into the canonical [`Listing`].
//!
//! Nothing in here fails: missing or malformed fields degrade to defaults so
//! a bad record can never take a page down with it.

use crate::db::properties::PropertyRow;
use crate::domain::listing::{Listing, OfferType, Origin};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

/// Rotation of cover images for records that arrive without pictures.
pub const FALLBACK_PICTURES: [&str; 6] = [
    "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1600047509807-ba8f99d2cdde?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1600566753190-17f0bcd2a6c4?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1600572236304-f8a736f05141?q=80&w=1200&auto=format&fit=crop",
];

const SYNTHETIC_ID_LEN: usize = 8;

/// Which bound of a `{min, max}` range represents the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    PreferMax,
    PreferMin,
}

/// A numeric field as it shows up on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber {
    Scalar(f64),
    Range { min: Option<f64>, max: Option<f64> },
    Absent,
}

impl RawNumber {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map(RawNumber::Scalar).unwrap_or(RawNumber::Absent),
            Some(Value::String(s)) => s
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(RawNumber::Scalar)
                .unwrap_or(RawNumber::Absent),
            Some(Value::Object(map)) => RawNumber::Range {
                min: map.get("min").and_then(Value::as_f64),
                max: map.get("max").and_then(Value::as_f64),
            },
            _ => RawNumber::Absent,
        }
    }

    pub fn collapse(self, policy: RangePolicy) -> f64 {
        match self {
            RawNumber::Scalar(n) => n,
            RawNumber::Range { min, max } => {
                let (first, second) = match policy {
                    RangePolicy::PreferMax => (max, min),
                    RangePolicy::PreferMin => (min, max),
                };
                first.or(second).unwrap_or(0.0)
            }
            RawNumber::Absent => 0.0,
        }
    }
}

/// Pick a cover image by position so neighbouring cards differ.
pub fn fallback_picture(index: usize) -> &'static str {
    FALLBACK_PICTURES[index % FALLBACK_PICTURES.len()]
}

/// Short random token used only as a render key. Not a stable identity.
pub fn synthetic_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SYNTHETIC_ID_LEN)
        .map(char::from)
        .collect()
}

fn pictures_or_fallback(pictures: Vec<String>, index: usize) -> Vec<String> {
    if pictures.is_empty() {
        vec![fallback_picture(index).to_string()]
    } else {
        pictures
    }
}

fn number(record: &Value, keys: &[&str], policy: RangePolicy) -> f64 {
    keys.iter()
        .map(|k| RawNumber::from_value(record.get(*k)))
        .find(|n| *n != RawNumber::Absent)
        .unwrap_or(RawNumber::Absent)
        .collapse(policy)
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| text(record.get(*k)))
        .unwrap_or_default()
}

/// Address parts may be flat (`street`, `city`, `state`) or nested under
/// `address` (`streetAddress`, `city`, `state`).
fn address_part(record: &Value, flat: &str, nested: &str) -> String {
    text(record.get(flat))
        .or_else(|| text(record.get("address").and_then(|a| a.get(nested))))
        .unwrap_or_default()
}

fn pictures(record: &Value) -> Vec<String> {
    let Some(items) = record.get("pictures").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|p| match p {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(o) => o.get("url").and_then(Value::as_str).map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize one record from the scraped dataset.
pub fn normalize_external(record: &Value, index: usize) -> Listing {
    let offer = first_text(record, &["offerType", "offer_type", "statusType"]);

    Listing {
        id: non_empty(first_text(record, &["id", "zpid"])).unwrap_or_else(synthetic_id),
        price: number(record, &["price", "unformattedPrice"], RangePolicy::PreferMin),
        offer_type: OfferType::parse(&offer),
        property_type: first_text(record, &["realEstateType", "propertyType", "homeType"]),
        street: address_part(record, "street", "streetAddress"),
        city: address_part(record, "city", "city"),
        state: address_part(record, "state", "state"),
        bedrooms: number(record, &["bedrooms", "beds"], RangePolicy::PreferMax),
        bathrooms: number(record, &["bathrooms", "baths"], RangePolicy::PreferMax),
        living_area: number(record, &["livingArea", "area", "sqft"], RangePolicy::PreferMax),
        pictures: pictures_or_fallback(pictures(record), index),
        description: first_text(record, &["description"]),
        source_url: non_empty(first_text(record, &["url", "detailUrl"]))
            .unwrap_or_else(|| "#".to_string()),
        origin: Origin::External,
    }
}

/// Normalize every record of an external batch, keeping API order.
/// `offset` is the display position of the first record, so fallback
/// pictures keep rotating after any listings shown before this batch.
pub fn normalize_external_all(records: &[Value], offset: usize) -> Vec<Listing> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| normalize_external(r, offset + i))
        .collect()
}

/// Normalize one persisted-store row.
pub fn normalize_store(row: &PropertyRow, index: usize) -> Listing {
    let image = row
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default();

    Listing {
        id: row.id.to_string(),
        price: row.price.unwrap_or(0.0),
        offer_type: OfferType::parse(row.offer_type.as_deref().unwrap_or_default()),
        property_type: row.property_type.clone().unwrap_or_default(),
        street: row.street.clone().unwrap_or_default(),
        city: row.city.clone().unwrap_or_default(),
        state: row.state.clone().unwrap_or_default(),
        bedrooms: row.bedrooms.unwrap_or(0.0),
        bathrooms: row.bathrooms.unwrap_or(0.0),
        living_area: row.sqft.unwrap_or(0.0),
        pictures: pictures_or_fallback(image, index),
        description: row.description.clone().unwrap_or_default(),
        source_url: "#".to_string(),
        origin: Origin::Store,
    }
}

pub fn normalize_store_all(rows: &[PropertyRow]) -> Vec<Listing> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| normalize_store(r, i))
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
