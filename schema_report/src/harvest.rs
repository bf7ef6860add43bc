use indexmap::IndexMap;
use serde_json::Value;

use crate::pointer;

/// An object field matched during a harvest walk.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestedField {
    pub name: String,
    pub parent_pointer: String,
    pub value: Value,
}

/// Walks `node` and collects every object field whose name satisfies
/// `predicate`, keyed by the field's own JSON Pointer. Arrays are traversed
/// into their object and array elements. A matched field's subtree is only
/// searched further when `recurse_inside_matches` is set.
pub fn harvest<P>(
    node: &Value,
    predicate: P,
    recurse_inside_matches: bool,
) -> IndexMap<String, HarvestedField>
where
    P: Fn(&str) -> bool,
{
    let mut found = IndexMap::new();
    walk(node, "", &predicate, recurse_inside_matches, &mut found);
    found
}

fn walk<P>(
    node: &Value,
    at: &str,
    predicate: &P,
    recurse_inside_matches: bool,
    found: &mut IndexMap<String, HarvestedField>,
) where
    P: Fn(&str) -> bool,
{
    match node {
        Value::Object(fields) => {
            for (name, child) in fields {
                let here = pointer::join(at, name);
                if predicate(name) {
                    found.insert(
                        here.clone(),
                        HarvestedField {
                            name: name.clone(),
                            parent_pointer: at.to_string(),
                            value: child.clone(),
                        },
                    );
                    if !recurse_inside_matches {
                        continue;
                    }
                }
                walk(child, &here, predicate, recurse_inside_matches, found);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                if child.is_object() || child.is_array() {
                    walk(
                        child,
                        &format!("{at}/{index}"),
                        predicate,
                        recurse_inside_matches,
                        found,
                    );
                }
            }
        }
        _ => {}
    }
}
