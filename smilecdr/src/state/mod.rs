//! Host-state adapters
//!
//! Bidirectional mapping between the typed OpenID records and the generic
//! attribute maps a host runtime passes around. Every stringly-typed
//! conversion for these resources lives here and nowhere else.

mod client;
mod server;

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use reconcile::{Attributes, ReconcileError, Result, Value};

pub(crate) fn parse_timestamp(name: &str, raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>().map_err(|e| {
        ReconcileError::Validation(format!(
            "attribute '{}': '{}' is not an RFC 3339 timestamp: {}",
            name, raw, e
        ))
    })
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn get_timestamp(attrs: &Attributes, name: &str) -> Result<Option<DateTime<Utc>>> {
    attrs
        .get_string(name)?
        .map(|raw| parse_timestamp(name, &raw))
        .transpose()
}

pub(crate) fn get_string_set(attrs: &Attributes, name: &str) -> Result<BTreeSet<String>> {
    Ok(attrs
        .get_string_list(name)?
        .map(|list| list.into_iter().collect())
        .unwrap_or_default())
}

pub(crate) fn string_set_value(set: &BTreeSet<String>) -> Value {
    Value::List(set.iter().map(|s| Value::String(s.clone())).collect())
}
