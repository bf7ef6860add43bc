//! Cloud facts: layer ordering, and the cloud cover certain weather demands.

use itertools::Itertools;
use schema_report::harvest::harvest;
use serde_json::Value;

use crate::value;

use super::phenomena;

/// Cloud layers are reported bottom-up. `NSC` (or any textual sentinel)
/// trivially satisfies the ordering; layers without a readable height are
/// ignored.
pub(super) fn ascending_clouds(doc: &mut Value) {
    let owners = harvest(doc, |name| name == "clouds", false);
    for field in owners.values() {
        let ascending = match &field.value {
            Value::String(_) => true,
            Value::Array(layers) => heights_non_decreasing(layers),
            _ => continue,
        };
        if let Some(owner) = doc.pointer_mut(&field.parent_pointer) {
            value::set_bool(owner, "cloudsAscending", ascending);
        }
    }
}

fn heights_non_decreasing(layers: &[Value]) -> bool {
    layers
        .iter()
        .filter_map(|layer| value::int_field(layer, "height"))
        .tuple_windows()
        .all(|(lower, upper)| lower <= upper)
}

/// Showers need at least one cloud layer and a CB or TCU among them;
/// thunderstorms need a CB. A CB in turn needs rain or a thunderstorm in the
/// weather, and without significant weather a CB must not be present at all.
pub(super) fn cloud_needed_rain_or_modifier(doc: &mut Value) {
    if let Some(forecast) = doc.get_mut("forecast") {
        annotate_cloud_requirements(forecast);
    }
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        if let Some(forecast) = group.get_mut("forecast") {
            annotate_cloud_requirements(forecast);
        }
    }
}

fn annotate_cloud_requirements(forecast: &mut Value) {
    let layers: Option<Vec<Value>> = forecast
        .get("clouds")
        .and_then(Value::as_array)
        .map(Vec::clone);
    let layers = layers.as_deref();
    let has_cb = layers.is_some_and(|layers| any_modifier(layers, &["CB"]));
    let weather = forecast.get("weather").cloned();

    match &weather {
        Some(Value::Array(weather_groups)) if !weather_groups.is_empty() => {
            let mut showers = false;
            let mut thunderstorm = false;
            let mut rain_or_thunderstorm = false;
            for weather_group in weather_groups {
                match value::str_field(weather_group, "descriptor") {
                    Some("showers") => {
                        showers = true;
                        rain_or_thunderstorm = true;
                    }
                    Some("thunderstorm") => {
                        thunderstorm = true;
                        rain_or_thunderstorm = true;
                    }
                    _ => {}
                }
                if phenomena(weather_group).any(|p| p == "rain") {
                    rain_or_thunderstorm = true;
                }
            }
            if showers {
                value::set_bool(
                    forecast,
                    "cloudsNeededAndPresent",
                    layers.is_some_and(|layers| !layers.is_empty()),
                );
                value::set_bool(
                    forecast,
                    "cloudsCBorTCUNeededAndPresent",
                    layers.is_some_and(|layers| any_modifier(layers, &["CB", "TCU"])),
                );
            }
            if thunderstorm {
                value::set_bool(forecast, "cloudsCBNeededAndPresent", has_cb);
            }
            if has_cb {
                value::set_bool(forecast, "cloudsModifierHasWeatherPresent", rain_or_thunderstorm);
            }
        }
        _ => {
            // no weather, or the NSW sentinel
            if layers.is_some() {
                value::set_bool(forecast, "cloudsModifierHasWeatherPresent", !has_cb);
            }
        }
    }
}

fn any_modifier(layers: &[Value], modifiers: &[&str]) -> bool {
    layers.iter().any(|layer| {
        value::str_field(layer, "mod").is_some_and(|modifier| modifiers.contains(&modifier))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nsc_is_trivially_ascending() {
        let mut doc = json!({"forecast": {"clouds": "NSC"}});
        ascending_clouds(&mut doc);
        assert_eq!(doc["forecast"]["cloudsAscending"], json!(true));
    }

    #[test]
    fn test_layer_heights_must_not_descend() {
        let mut doc = json!({
            "forecast": {"clouds": [
                {"height": 20}, {"amount": "BKN"}, {"height": 40}, {"height": 30}
            ]},
            "changegroups": [{"forecast": {"clouds": [{"height": 10}, {"height": 90}]}}]
        });
        ascending_clouds(&mut doc);
        assert_eq!(doc["forecast"]["cloudsAscending"], json!(false));
        assert_eq!(
            doc["changegroups"][0]["forecast"]["cloudsAscending"],
            json!(true)
        );
    }

    #[test]
    fn test_showers_need_convective_clouds() {
        let mut doc = json!({"forecast": {
            "weather": [{"descriptor": "showers", "phenomena": ["rain"]}],
            "clouds": [{"height": 20, "mod": "TCU"}]
        }});
        cloud_needed_rain_or_modifier(&mut doc);
        let forecast = &doc["forecast"];
        assert_eq!(forecast["cloudsNeededAndPresent"], json!(true));
        assert_eq!(forecast["cloudsCBorTCUNeededAndPresent"], json!(true));
        assert_eq!(forecast.get("cloudsCBNeededAndPresent"), None);
    }

    #[test]
    fn test_showers_with_nsc_fail_the_requirement() {
        let mut doc = json!({"forecast": {
            "weather": [{"descriptor": "showers", "phenomena": ["rain"]}],
            "clouds": "NSC"
        }});
        cloud_needed_rain_or_modifier(&mut doc);
        assert_eq!(doc["forecast"]["cloudsNeededAndPresent"], json!(false));
    }

    #[test]
    fn test_thunderstorm_needs_cb() {
        let mut doc = json!({"forecast": {
            "weather": [{"descriptor": "thunderstorm", "phenomena": ["rain"]}],
            "clouds": [{"height": 30, "mod": "CB"}]
        }});
        cloud_needed_rain_or_modifier(&mut doc);
        let forecast = &doc["forecast"];
        assert_eq!(forecast["cloudsCBNeededAndPresent"], json!(true));
        assert_eq!(forecast["cloudsModifierHasWeatherPresent"], json!(true));
    }

    #[test]
    fn test_cb_without_significant_weather_is_flagged() {
        let mut doc = json!({"forecast": {
            "weather": "NSW",
            "clouds": [{"height": 30, "mod": "CB"}]
        }});
        cloud_needed_rain_or_modifier(&mut doc);
        assert_eq!(
            doc["forecast"]["cloudsModifierHasWeatherPresent"],
            json!(false)
        );

        let mut doc = json!({"forecast": {"clouds": [{"height": 30}]}});
        cloud_needed_rain_or_modifier(&mut doc);
        assert_eq!(
            doc["forecast"]["cloudsModifierHasWeatherPresent"],
            json!(true)
        );
    }

    #[test]
    fn test_cb_with_plain_rain_is_consistent() {
        let mut doc = json!({"forecast": {
            "weather": [{"phenomena": ["rain"]}],
            "clouds": [{"height": 30, "mod": "CB"}]
        }});
        cloud_needed_rain_or_modifier(&mut doc);
        assert_eq!(
            doc["forecast"]["cloudsModifierHasWeatherPresent"],
            json!(true)
        );
    }
}
