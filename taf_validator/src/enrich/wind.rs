//! Wind facts: gust margin over the mean wind, and whether a change group
//! shifts the wind enough to justify its existence.

use schema_report::harvest::harvest;
use serde_json::Value;

use crate::{util, value};

/// Gusts are only reported when they exceed the mean speed by 10 knots.
/// Applies to every wind node in the document, base and change groups alike.
pub(super) fn wind_gust(doc: &mut Value) {
    let winds = harvest(doc, |name| name == "wind", false);
    for pointer in winds.keys() {
        let Some(wind) = doc.pointer_mut(pointer) else {
            continue;
        };
        let (Some(gusts), Some(speed)) = (
            value::int_field(wind, "gusts"),
            value::int_field(wind, "speed"),
        ) else {
            continue;
        };
        value::set_bool(wind, "gustFastEnough", gusts >= speed + 10);
    }
}

/// A change group's wind must differ from the running baseline: 30 degrees
/// of direction, 5 knots of speed, or a transition into gusts. Probabilistic
/// groups are measured but never become the new baseline.
pub(super) fn enough_wind_change(doc: &mut Value) {
    let mut baseline = doc
        .pointer("/forecast/wind")
        .cloned()
        .unwrap_or(Value::Null);
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        let advances = value::advances_baseline(group);
        let Some(wind) = group.pointer_mut("/forecast/wind") else {
            continue;
        };
        if let (Some(direction), Some(speed), Some(base_direction), Some(base_speed)) = (
            value::int_field(wind, "direction"),
            value::int_field(wind, "speed"),
            value::int_field(&baseline, "direction"),
            value::int_field(&baseline, "speed"),
        ) {
            let direction_diff = util::shortest_arc(base_direction, direction);
            let speed_diff = (speed - base_speed).abs();
            let becomes_gusty = value::int_field(&baseline, "gusts").is_none()
                && value::int_field(wind, "gusts").is_some_and(|gusts| gusts > 0);
            value::set_int(wind, "directionDiff", direction_diff);
            value::set_int(wind, "speedDiff", speed_diff);
            value::set_bool(
                wind,
                "windEnoughDifference",
                direction_diff >= 30 || speed_diff >= 5 || becomes_gusty,
            );
        }
        if advances {
            baseline = wind.clone();
        }
    }
}
