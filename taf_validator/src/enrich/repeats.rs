//! A change group that forecasts exactly what already holds is noise.

use serde_json::Value;

use crate::value;

/// Compares each change group's wind, visibility, weather and clouds against
/// the running baseline forecast; any exact repeat marks the group. A base
/// forecast without weather first gets the `NSW` sentinel, so an explicit
/// `NSW` in a change group counts as a repeat.
pub(super) fn non_repeating_changes(doc: &mut Value) {
    if let Some(Value::Object(fields)) = doc.get_mut("forecast") {
        fields
            .entry("weather")
            .or_insert_with(|| Value::String("NSW".to_string()));
    }
    let mut baseline = doc.get("forecast").cloned().unwrap_or(Value::Null);
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        let advances = value::advances_baseline(group);
        let Some(forecast) = group.get("forecast") else {
            continue;
        };
        let repeating = ["wind", "visibility", "weather", "clouds"]
            .iter()
            .any(|field| {
                baseline
                    .get(field)
                    .is_some_and(|baseline_value| Some(baseline_value) == forecast.get(field))
            });
        let next_baseline = advances.then(|| forecast.clone());
        value::set_bool(group, "repeatingChange", repeating);
        if let Some(next) = next_baseline {
            baseline = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_repeated_wind_is_flagged() {
        let mut doc = json!({
            "forecast": {"wind": {"direction": 100, "speed": 10}},
            "changegroups": [{
                "changeType": "BECMG",
                "forecast": {"wind": {"direction": 100, "speed": 10}}
            }]
        });
        non_repeating_changes(&mut doc);
        assert_eq!(doc["changegroups"][0]["repeatingChange"], json!(true));
    }

    #[test]
    fn test_changed_wind_is_not_flagged() {
        let mut doc = json!({
            "forecast": {"wind": {"direction": 100, "speed": 10}},
            "changegroups": [{
                "changeType": "BECMG",
                "forecast": {"wind": {"direction": 140, "speed": 20}}
            }]
        });
        non_repeating_changes(&mut doc);
        assert_eq!(doc["changegroups"][0]["repeatingChange"], json!(false));
    }

    #[test]
    fn test_missing_weather_becomes_nsw_and_matches() {
        let mut doc = json!({
            "forecast": {"wind": {"direction": 100, "speed": 10}},
            "changegroups": [{
                "changeType": "BECMG",
                "forecast": {"weather": "NSW"}
            }]
        });
        non_repeating_changes(&mut doc);
        assert_eq!(doc["forecast"]["weather"], json!("NSW"));
        assert_eq!(doc["changegroups"][0]["repeatingChange"], json!(true));
    }

    #[test]
    fn test_baseline_moves_past_non_prob_groups() {
        let mut doc = json!({
            "forecast": {"visibility": {"value": 5000}},
            "changegroups": [
                {"changeType": "BECMG", "forecast": {"visibility": {"value": 8000}}},
                {"changeType": "BECMG", "forecast": {"visibility": {"value": 8000}}}
            ]
        });
        non_repeating_changes(&mut doc);
        assert_eq!(doc["changegroups"][0]["repeatingChange"], json!(false));
        assert_eq!(doc["changegroups"][1]["repeatingChange"], json!(true));
    }

    #[test]
    fn test_prob_group_does_not_become_the_baseline() {
        let mut doc = json!({
            "forecast": {"visibility": {"value": 5000}},
            "changegroups": [
                {"changeType": "PROB40", "forecast": {"visibility": {"value": 8000}}},
                {"changeType": "BECMG", "forecast": {"visibility": {"value": 8000}}}
            ]
        });
        non_repeating_changes(&mut doc);
        assert_eq!(doc["changegroups"][0]["repeatingChange"], json!(false));
        assert_eq!(doc["changegroups"][1]["repeatingChange"], json!(false));
    }
}
