//! Tolerant accessors over the raw document tree. Forecast fields are
//! pervasively optional and integer leaves may arrive as numbers or as
//! numeric strings; every accessor answers `None` instead of failing.

use jiff::civil::DateTime;
use serde_json::Value;

/// TAF timestamps are strictly `YYYY-MM-DDTHH:MM:SSZ`, always UTC.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn int_field(node: &Value, name: &str) -> Option<i64> {
    node.get(name).and_then(as_int)
}

pub(crate) fn str_field<'v>(node: &'v Value, name: &str) -> Option<&'v str> {
    node.get(name).and_then(Value::as_str)
}

pub(crate) fn parse_time(value: &Value) -> Option<DateTime> {
    DateTime::strptime(TIME_FORMAT, value.as_str()?).ok()
}

pub(crate) fn time_field(node: &Value, name: &str) -> Option<DateTime> {
    node.get(name).and_then(parse_time)
}

/// Whole hours between two instants, truncated, never negative.
pub(crate) fn whole_hours_between(start: DateTime, end: DateTime) -> Option<i64> {
    let span = start.until((jiff::Unit::Hour, end)).ok()?;
    Some(span.get_hours().abs().into())
}

pub(crate) fn set_bool(node: &mut Value, name: &str, value: bool) {
    if let Value::Object(fields) = node {
        fields.insert(name.to_string(), Value::Bool(value));
    }
}

pub(crate) fn set_int(node: &mut Value, name: &str, value: i64) {
    if let Value::Object(fields) = node {
        fields.insert(name.to_string(), Value::from(value));
    }
}

pub(crate) fn changegroups(doc: &Value) -> &[Value] {
    doc.get("changegroups")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub(crate) fn changegroups_mut(doc: &mut Value) -> Option<&mut Vec<Value>> {
    doc.get_mut("changegroups").and_then(Value::as_array_mut)
}

pub(crate) fn change_type(group: &Value) -> Option<&str> {
    str_field(group, "changeType")
}

/// A change group advances the running baseline unless it is probabilistic.
pub(crate) fn advances_baseline(group: &Value) -> bool {
    change_type(group).is_some_and(|change_type| !change_type.starts_with("PROB"))
}
