//! Upstream response shaping.
//!
//! Most upstream payloads already are the contract clients rely on and pass
//! through untouched. Transaction history is the exception: the upstream
//! event schema varies by event type, so every event is defaulted
//! field-by-field before it reaches a client. Shaping is total; no upstream
//! payload shape can make it panic.

use serde_json::{json, Map, Value};
use std::cmp::Ordering;

use crate::gateway::endpoint::EndpointKind;
use crate::gateway::params::RequestDescriptor;

/// Fields defaulted to `null` when an event does not carry them.
const NULLABLE_EVENT_FIELDS: &[&str] = &[
    "txHash",
    "timestamp",
    "fromAddress",
    "toAddress",
    "amountUsd",
    "gasUsed",
    "gasPrice",
];

/// Reshape a successful upstream payload into the client-facing schema.
pub fn shape_response(kind: EndpointKind, descriptor: &RequestDescriptor, body: Value) -> Value {
    match kind {
        EndpointKind::TransactionHistory => shape_history(descriptor, body),
        _ => body,
    }
}

/// `{total, limit, offset, events}` with per-event defaults. Sorting and
/// pagination happen here; the upstream call fetches the raw event list.
fn shape_history(descriptor: &RequestDescriptor, body: Value) -> Value {
    let raw_events = extract_events(body);
    let total = raw_events.len();

    let limit = parse_count(descriptor.get("limit"), 100);
    let offset = parse_count(descriptor.get("offset"), 0);
    let sort_by = descriptor.get_or("sortBy", "timestamp");
    let ascending = descriptor.get("sortDirection") == Some("asc");

    let mut events: Vec<Value> = raw_events.iter().map(shape_event).collect();
    events.sort_by(|a, b| {
        let ordering = compare_values(a.get(sort_by), b.get(sort_by));
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    let events: Vec<Value> = events.into_iter().skip(offset).take(limit).collect();

    json!({
        "total": total,
        "limit": limit,
        "offset": offset,
        "events": events,
    })
}

/// Accept the event list wherever the upstream put it: an `items` array, an
/// `events` array, or a bare top-level array. Anything else shapes to empty.
fn extract_events(body: Value) -> Vec<Value> {
    match body {
        Value::Array(events) => events,
        Value::Object(mut map) => match map.remove("items").or_else(|| map.remove("events")) {
            Some(Value::Array(events)) => events,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn shape_event(raw: &Value) -> Value {
    let mut event = Map::new();
    event.insert("type".into(), lookup(raw, "type").unwrap_or_else(|| json!("unknown")));
    for field in NULLABLE_EVENT_FIELDS {
        event.insert((*field).into(), lookup(raw, field).unwrap_or(Value::Null));
    }
    event.insert(
        "tokenAmounts".into(),
        lookup(raw, "tokenAmounts").unwrap_or_else(|| json!([])),
    );
    event.insert(
        "protocolName".into(),
        lookup(raw, "protocolName").unwrap_or_else(|| json!("unknown")),
    );
    Value::Object(event)
}

/// Events carry fields either at the root or inside a nested `details`
/// object depending on the event type; accept both.
fn lookup(raw: &Value, field: &str) -> Option<Value> {
    raw.get(field)
        .or_else(|| raw.get("details").and_then(|details| details.get(field)))
        .filter(|v| !v.is_null())
        .cloned()
}

fn parse_count(value: Option<&str>, fallback: usize) -> usize {
    value.and_then(|v| v.parse().ok()).unwrap_or(fallback)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => match (a.as_str(), b.as_str()) {
                (Some(a), Some(b)) => a.cmp(b),
                _ => Ordering::Equal,
            },
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
