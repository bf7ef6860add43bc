use serde_json::Value;

/// Drops the trailing blank change group an editor typically leaves behind,
/// plus any null or property-less entries, before validation sees the
/// document. Only runs when more than one group is present, and never
/// removes the sole survivor.
pub fn scrub_changegroups(doc: &mut Value) {
    let Some(groups) = doc.get_mut("changegroups").and_then(Value::as_array_mut) else {
        return;
    };
    if groups.len() <= 1 {
        return;
    }
    groups.retain(|group| match group {
        Value::Null => false,
        Value::Object(fields) => !fields.is_empty(),
        _ => true,
    });
    if groups.len() <= 1 {
        return;
    }
    if groups.last().is_some_and(is_blank_group) {
        groups.pop();
    }
}

/// A group is blank when it is empty, when its forecast is empty, or when it
/// still holds exactly the editor defaults: no change type or times, empty
/// wind and visibility, `NSW` weather and `NSC` clouds.
fn is_blank_group(group: &Value) -> bool {
    let Some(fields) = group.as_object() else {
        return false;
    };
    if fields.is_empty() {
        return true;
    }
    let forecast = group.get("forecast");
    if forecast
        .and_then(Value::as_object)
        .is_some_and(|fields| fields.is_empty())
    {
        return true;
    }
    let change_type_blank = match group.get("changeType") {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        _ => false,
    };
    let forecast = forecast.unwrap_or(&Value::Null);
    change_type_blank
        && group.get("changeStart").is_none()
        && group.get("changeEnd").is_none()
        && empty_or_absent(forecast.get("wind"))
        && empty_or_absent(forecast.get("visibility"))
        && forecast.get("weather").and_then(Value::as_str) == Some("NSW")
        && forecast.get("clouds").and_then(Value::as_str) == Some("NSC")
}

fn empty_or_absent(node: Option<&Value>) -> bool {
    match node {
        None | Some(Value::Null) => true,
        Some(Value::Object(fields)) => fields.is_empty(),
        _ => false,
    }
}
