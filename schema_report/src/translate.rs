use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use serde_json::Value;

use crate::messages::MessageMap;

/// Instance pointer -> messages, each message recorded once per pointer.
pub type ErrorMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Default)]
struct Findings {
    /// Keywords seen per schema pointer.
    keywords: IndexMap<String, IndexSet<String>>,
    /// Instance pointers seen per schema pointer.
    instances: IndexMap<String, IndexSet<String>>,
}

/// Maps a raw report tree through the message map: every (schema pointer,
/// keyword) finding with a configured message lands on all instance pointers
/// observed for that schema pointer, then near-duplicate paths are dropped.
pub fn translate(report: &Value, messages: &MessageMap) -> ErrorMap {
    let mut findings = Findings::default();
    collect(report, &mut findings);

    let mut errors = ErrorMap::new();
    for (schema_pointer, keywords) in &findings.keywords {
        let Some(by_keyword) = messages.get(schema_pointer) else {
            tracing::debug!(pointer = %schema_pointer, "no messages configured, skipping");
            continue;
        };
        for keyword in keywords {
            let Some(message) = by_keyword.get(keyword) else {
                continue;
            };
            let instances = findings.instances.get(schema_pointer);
            for instance_pointer in instances.into_iter().flatten() {
                let slot = errors.entry(instance_pointer.clone()).or_default();
                if !slot.contains(message) {
                    slot.push(message.clone());
                }
            }
        }
    }
    drop_shadowed_paths(errors)
}

/// A finding is any node carrying `schema.pointer` together with `keyword`
/// and/or `instance.pointer`. Recursion descends through the `reports`
/// object (named sub-reports) and through array members.
fn collect(node: &Value, findings: &mut Findings) {
    match node {
        Value::Object(fields) => {
            let schema_pointer = node.pointer("/schema/pointer").and_then(Value::as_str);
            if let Some(schema_pointer) = schema_pointer {
                if let Some(keyword) = fields.get("keyword").and_then(Value::as_str) {
                    findings
                        .keywords
                        .entry(schema_pointer.to_string())
                        .or_default()
                        .insert(keyword.to_string());
                }
                if let Some(instance) = node.pointer("/instance/pointer").and_then(Value::as_str) {
                    findings
                        .instances
                        .entry(schema_pointer.to_string())
                        .or_default()
                        .insert(instance.to_string());
                }
            }
            if let Some(reports) = fields.get("reports").and_then(Value::as_object) {
                for (_, sub_report) in reports {
                    collect(sub_report, findings);
                }
            }
            for (_, child) in fields {
                if child.is_array() {
                    collect(child, findings);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, findings);
            }
        }
        _ => {}
    }
}

/// Schema errors fan out over related pointers; only the most specific path
/// of a run of near-duplicates is kept. Keys are scanned in lexicographic
/// order: a key is dropped when a successor proves it an exact subsequence,
/// and the scan over successors stops at the first one that does not. The
/// last key always survives.
fn drop_shadowed_paths(errors: ErrorMap) -> ErrorMap {
    let keys: Vec<&String> = errors.keys().sorted().collect();
    let mut kept = ErrorMap::new();
    for (index, key) in keys.iter().enumerate() {
        let mut shadowed = false;
        for later in &keys[index + 1..] {
            if is_subsequence(key, later) {
                shadowed = true;
            } else {
                break;
            }
        }
        if !shadowed {
            kept.insert((*key).clone(), errors[*key].clone());
        }
    }
    kept
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut remaining = haystack.chars();
    needle.chars().all(|wanted| remaining.any(|c| c == wanted))
}
