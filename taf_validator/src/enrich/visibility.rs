//! Visibility facts: low visibility demands an explanation in the weather,
//! and obscuration phenomena each come with a plausible visibility range.

use serde_json::Value;

use crate::value;

use super::phenomena;

/// Below 5000 m something must be obscuring the view, so the weather has to
/// be spelled out as a group list. Change groups inherit visibility and
/// weather from the running baseline when they carry none of their own.
pub(super) fn visibility_weather_required(doc: &mut Value) {
    let mut baseline_visibility = doc.pointer("/forecast/visibility").cloned();
    let mut baseline_weather = doc.pointer("/forecast/weather").cloned();
    if let Some(forecast) = doc.get_mut("forecast") {
        annotate_visibility_weather(forecast, None, None);
    }
    let Some(groups) = value::changegroups_mut(doc) else {
        return;
    };
    for group in groups.iter_mut() {
        let advances = value::advances_baseline(group);
        let Some(forecast) = group.get_mut("forecast") else {
            continue;
        };
        annotate_visibility_weather(
            forecast,
            baseline_visibility.as_ref(),
            baseline_weather.as_ref(),
        );
        if advances {
            if let Some(visibility) = forecast.get("visibility") {
                baseline_visibility = Some(visibility.clone());
            }
            if let Some(weather) = forecast.get("weather") {
                baseline_weather = Some(weather.clone());
            }
        }
    }
}

fn annotate_visibility_weather(
    forecast: &mut Value,
    inherited_visibility: Option<&Value>,
    inherited_weather: Option<&Value>,
) {
    let visibility = forecast
        .get("visibility")
        .or(inherited_visibility)
        .cloned();
    let weather = forecast.get("weather").or(inherited_weather).cloned();
    let Some(visibility_value) = visibility.as_ref().and_then(|v| value::int_field(v, "value"))
    else {
        return;
    };
    if visibility_value <= 5000 {
        value::set_bool(
            forecast,
            "visibilityWeatherRequiredAndPresent",
            weather.as_ref().is_some_and(Value::is_array),
        );
    }
}

/// Checks the reported visibility against the obscuration being forecast:
/// fog below 1000 m (shallow fog above), smoke, dust, sand and volcanic ash
/// below 5000 m, mist between 1000 and 5000 m, haze up to 5000 m. The
/// verdict, also when a change group is being checked, lands on the base
/// forecast.
pub(super) fn max_visibility(doc: &mut Value) {
    let mut baseline_visibility = doc.pointer("/forecast/visibility").cloned();
    let mut baseline_weather = doc.pointer("/forecast/weather").cloned();
    let mut verdict = within_limit(baseline_weather.as_ref(), baseline_visibility.as_ref());

    for group in value::changegroups(doc) {
        let forecast = group.get("forecast");
        let visibility = forecast
            .and_then(|f| f.get("visibility"))
            .cloned()
            .or_else(|| baseline_visibility.clone());
        let weather = forecast
            .and_then(|f| f.get("weather"))
            .cloned()
            .or_else(|| baseline_weather.clone());
        if let Some(within) = within_limit(weather.as_ref(), visibility.as_ref()) {
            verdict = Some(within);
        }
        if value::advances_baseline(group) {
            if forecast.and_then(|f| f.get("visibility")).is_some() {
                baseline_visibility = visibility;
            }
            if forecast.and_then(|f| f.get("weather")).is_some() {
                baseline_weather = weather;
            }
        }
    }

    if let Some(within) = verdict
        && let Some(forecast) = doc.get_mut("forecast")
    {
        value::set_bool(forecast, "visibilityWithinLimit", within);
    }
}

fn within_limit(weather: Option<&Value>, visibility: Option<&Value>) -> Option<bool> {
    let weather_groups = weather?.as_array()?;
    let visibility_value = value::int_field(visibility?, "value")?;
    let mut verdict = None;
    for weather_group in weather_groups {
        let descriptor = value::str_field(weather_group, "descriptor");
        for phenomenon in phenomena(weather_group) {
            let within = match phenomenon {
                "fog" => match descriptor {
                    None => visibility_value < 1000,
                    Some("shallow") => visibility_value > 1000,
                    Some(_) => true,
                },
                "smoke" | "dust" | "sand" | "volcanic ash" => visibility_value < 5000,
                "mist" => (1000..=5000).contains(&visibility_value),
                "haze" => visibility_value <= 5000,
                _ => continue,
            };
            verdict = Some(within);
        }
    }
    verdict
}
