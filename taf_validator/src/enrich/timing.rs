//! Temporal ordering of change groups: ascending starts, BECMG overlap,
//! duration and start/end sanity.

use jiff::civil::DateTime;
use serde_json::Value;

use crate::value;

/// Change starts must not go back in time. An equal start is allowed for
/// probabilistic groups, and for `BECMG`/`TEMPO` groups starting exactly at
/// the TAF validity start. Unparseable dates read as not ascending.
pub(super) fn changegroups_increasing(doc: &mut Value) {
    let validity_start = value::time_field(doc, "validityStart");
    let mut previous = validity_start;
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        let start = value::time_field(group, "changeStart");
        let ascending = match (start, previous) {
            (Some(start), Some(previous)) => {
                start > previous
                    || (start == previous && equality_allowed(group, start, validity_start))
            }
            _ => false,
        };
        value::set_bool(group, "changegroupsAscending", ascending);
        if let Some(start) = start {
            previous = Some(start);
        }
    }
}

fn equality_allowed(group: &Value, start: DateTime, validity_start: Option<DateTime>) -> bool {
    let Some(change_type) = value::change_type(group) else {
        return false;
    };
    change_type.starts_with("PROB")
        || ((change_type.starts_with("BECMG") || change_type.starts_with("TEMPO"))
            && validity_start == Some(start))
}

/// A `BECMG` may not start before an earlier `BECMG` has finished.
pub(super) fn overlapping_becoming(doc: &mut Value) {
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    let mut becoming_ends: Vec<DateTime> = Vec::new();
    for group in groups.iter_mut() {
        if value::change_type(group) != Some("BECMG") {
            continue;
        }
        let start = value::time_field(group, "changeStart");
        let overlaps = start.is_some_and(|start| becoming_ends.iter().any(|end| start < *end));
        value::set_bool(group, "changegroupBecomingOverlaps", overlaps);
        if let Some(end) = value::time_field(group, "changeEnd") {
            becoming_ends.push(end);
        }
    }
}

/// Whole hours covered by each change group. A group without its own end
/// time runs to the end of the TAF validity.
pub(super) fn changegroup_duration(doc: &mut Value) {
    let validity_end = value::time_field(doc, "validityEnd");
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        let Some(start) = value::time_field(group, "changeStart") else {
            continue;
        };
        let Some(end) = value::time_field(group, "changeEnd").or(validity_end) else {
            continue;
        };
        if let Some(hours) = value::whole_hours_between(start, end) {
            value::set_int(group, "changeDurationInHours", hours);
        }
    }
}

pub(super) fn end_times(doc: &mut Value) {
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        let (Some(start), Some(end)) = (
            value::time_field(group, "changeStart"),
            value::time_field(group, "changeEnd"),
        ) else {
            continue;
        };
        value::set_bool(group, "endAfterStart", start <= end);
    }
}
