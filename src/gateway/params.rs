//! Inbound parameter resolution.
//!
//! Historical clients send the same logical field under either its camelCase
//! name or an all-lowercase variant; both must keep working. Resolution is a
//! pure function: for each canonical field the first non-empty value wins in
//! the order camelCase key, lowercase key, kind-specific default.

use std::collections::{BTreeMap, HashMap};

use crate::gateway::endpoint::EndpointKind;

/// Largest page size a client may request for history events.
const MAX_HISTORY_LIMIT: i64 = 1000;

const DEFAULT_HISTORY_LIMIT: &str = "100";
const DEFAULT_HISTORY_OFFSET: &str = "0";

/// One canonical field and how to resolve it.
struct FieldSpec {
    name: &'static str,
    /// All-lowercase alias accepted for compatibility.
    alias: &'static str,
    default: Option<&'static str>,
}

const fn field(name: &'static str, alias: &'static str) -> FieldSpec {
    FieldSpec { name, alias, default: None }
}

const fn field_or(name: &'static str, alias: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec { name, alias, default: Some(default) }
}

const BALANCE_FIELDS: &[FieldSpec] = &[field("walletAddress", "walletaddress")];

const CHART_SECONDS_FIELDS: &[FieldSpec] = &[field("token1", "token1"), field("period", "period")];

const CHART_LABEL_FIELDS: &[FieldSpec] = &[
    field("token0", "token0"),
    field("token1", "token1"),
    field("period", "period"),
];

const QUOTE_FIELDS: &[FieldSpec] = &[
    field_or("srcChain", "srcchain", "1"),
    field_or("dstChain", "dstchain", "42161"),
    field("srcTokenAddress", "srctokenaddress"),
    field("dstTokenAddress", "dsttokenaddress"),
    field("amount", "amount"),
    field("walletAddress", "walletaddress"),
    field_or("enableEstimate", "enableestimate", "true"),
    field_or("source", "source", "sdk"),
];

const FUSION_PLUS_QUOTE_FIELDS: &[FieldSpec] = &[
    field_or("srcChain", "srcchain", "1"),
    field_or("dstChain", "dstchain", "42161"),
    field("srcTokenAddress", "srctokenaddress"),
    field("dstTokenAddress", "dsttokenaddress"),
    field("amount", "amount"),
    field("walletAddress", "walletaddress"),
    field_or("enableEstimate", "enableestimate", "true"),
];

const HISTORY_FIELDS: &[FieldSpec] = &[
    field("address", "address"),
    field_or("limit", "limit", DEFAULT_HISTORY_LIMIT),
    field_or("offset", "offset", DEFAULT_HISTORY_OFFSET),
    field_or("sortBy", "sortby", "timestamp"),
    field_or("sortDirection", "sortdirection", "desc"),
];

const NEWS_FIELDS: &[FieldSpec] = &[field_or("q", "q", "Bitcoin AND Ethereum"), field("from", "from")];

/// Canonical, resolved request parameters. Immutable once validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    fields: BTreeMap<&'static str, String>,
}

impl RequestDescriptor {
    /// Resolved value for a canonical field, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Resolved value with a fallback for optional fields.
    pub fn get_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.get(name).unwrap_or(fallback)
    }
}

/// Resolve the inbound query into a canonical descriptor for `kind`.
pub fn resolve(kind: EndpointKind, query: &HashMap<String, String>) -> RequestDescriptor {
    let specs = match kind {
        EndpointKind::Balance => BALANCE_FIELDS,
        EndpointKind::ChartByPeriodSeconds => CHART_SECONDS_FIELDS,
        EndpointKind::ChartByPeriodLabel => CHART_LABEL_FIELDS,
        EndpointKind::Quote => QUOTE_FIELDS,
        EndpointKind::FusionPlusQuote => FUSION_PLUS_QUOTE_FIELDS,
        EndpointKind::TransactionHistory => HISTORY_FIELDS,
        EndpointKind::News => NEWS_FIELDS,
    };

    let mut fields = BTreeMap::new();
    for spec in specs {
        let value = non_empty(query.get(spec.name))
            .or_else(|| non_empty(query.get(spec.alias)))
            .map(String::from)
            .or_else(|| spec.default.map(String::from));
        if let Some(value) = value {
            fields.insert(spec.name, value);
        }
    }

    if kind == EndpointKind::TransactionHistory {
        coerce_integer(&mut fields, "limit", DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
        coerce_integer(&mut fields, "offset", DEFAULT_HISTORY_OFFSET, i64::MAX);
    }

    RequestDescriptor { fields }
}

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.is_empty())
}

/// Coerce a field to a non-negative integer, clamped to `max`. Values that do
/// not parse fall back to the default.
fn coerce_integer(
    fields: &mut BTreeMap<&'static str, String>,
    name: &'static str,
    default: &'static str,
    max: i64,
) {
    let coerced = fields
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(|n| n.clamp(0, max))
        .map(|n| n.to_string())
        .unwrap_or_else(|| default.to_string());
    fields.insert(name, coerced);
}
