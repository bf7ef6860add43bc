//! Derives aviation-rule facts and writes them into the forecast tree for
//! the second validation pass to check. Every rule tolerates arbitrary input
//! shapes: missing or malformed nodes make it skip, never fail, and no rule
//! ever removes a key.

mod clouds;
mod repeats;
mod timing;
mod visibility;
mod wind;

use serde_json::Value;

/// Applies every rule, in this fixed order.
pub fn enrich(doc: &mut Value) {
    timing::changegroups_increasing(doc);
    timing::overlapping_becoming(doc);
    timing::changegroup_duration(doc);
    wind::wind_gust(doc);
    clouds::ascending_clouds(doc);
    timing::end_times(doc);
    visibility::visibility_weather_required(doc);
    wind::enough_wind_change(doc);
    clouds::cloud_needed_rain_or_modifier(doc);
    visibility::max_visibility(doc);
    repeats::non_repeating_changes(doc);
}

pub(crate) fn phenomena(weather_group: &Value) -> impl Iterator<Item = &str> {
    weather_group
        .get("phenomena")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_enrich_tolerates_arbitrary_json() {
        for mut doc in [
            json!(null),
            json!("TAF ENGM"),
            json!(42),
            json!([1, [2], {"changegroups": "nope"}]),
            json!({"forecast": "text", "changegroups": [null, 3, {"forecast": []}]}),
            json!({"validityStart": false, "changegroups": [{"changeStart": {}}]}),
        ] {
            let before = doc.clone();
            enrich(&mut doc);
            // nothing readable, nothing written; above all, no panic
            if !before.is_object() {
                assert_eq!(doc, before);
            }
        }
    }

    #[test]
    fn test_enrich_never_removes_keys() {
        let mut doc = json!({
            "validityStart": "2024-03-01T06:00:00Z",
            "validityEnd": "2024-03-02T06:00:00Z",
            "custom": {"kept": true},
            "forecast": {
                "wind": {"direction": 100, "speed": 15, "gusts": 25, "vendor": "x"},
                "visibility": {"value": 4000},
                "weather": [{"descriptor": "showers", "phenomena": ["rain"]}],
                "clouds": [{"height": 20, "mod": "CB"}]
            },
            "changegroups": [{
                "changeType": "BECMG",
                "changeStart": "2024-03-01T08:00:00Z",
                "changeEnd": "2024-03-01T10:00:00Z",
                "forecast": {"wind": {"direction": 140, "speed": 20}}
            }]
        });
        let before = doc.clone();
        enrich(&mut doc);
        assert_subset(&before, &doc);
    }

    fn assert_subset(before: &Value, after: &Value) {
        match (before, after) {
            (Value::Object(b), Value::Object(a)) => {
                for (key, value) in b {
                    let kept = a.get(key).unwrap_or_else(|| panic!("lost key {key}"));
                    assert_subset(value, kept);
                }
            }
            (Value::Array(b), Value::Array(a)) => {
                assert_eq!(b.len(), a.len());
                for (value, kept) in b.iter().zip(a) {
                    assert_subset(value, kept);
                }
            }
            (b, a) => assert_eq!(b, a),
        }
    }
}
