use indexmap::IndexMap;
use serde_json::Value;

use crate::{error::SchemaError, harvest::harvest, report, store::SchemaStore};

/// Schema fields starting with this prefix are directives for this crate, not
/// JSON Schema keywords, and must not reach the engine.
pub const DIRECTIVE_PREFIX: &str = "$geoweb::";

/// The only defined directive: an object mapping schema keywords to the
/// message shown when that keyword fails at this schema location.
pub const MESSAGES_DIRECTIVE: &str = "$geoweb::messages";

/// Schema pointer -> keyword -> message.
pub type MessageMap = IndexMap<String, IndexMap<String, String>>;

/// Lifts every message directive out of `schema`, recording it under the
/// pointer of the schema object carrying it, then strips all directive fields
/// so the remainder is plain JSON Schema.
pub fn extract_messages(schema: &mut Value) -> MessageMap {
    let directives = harvest(schema, |name| name == MESSAGES_DIRECTIVE, false);
    let mut map = MessageMap::new();
    for field in directives.values() {
        let Some(by_keyword) = field.value.as_object() else {
            tracing::warn!(
                pointer = %field.parent_pointer,
                "message directive is not an object, dropping it"
            );
            continue;
        };
        let mut keywords = IndexMap::new();
        for (keyword, message) in by_keyword {
            match message.as_str() {
                Some(text) => {
                    keywords.insert(keyword.clone(), text.to_string());
                }
                None => tracing::warn!(
                    pointer = %field.parent_pointer,
                    keyword = %keyword,
                    "message for keyword is not a string, dropping it"
                ),
            }
        }
        map.insert(field.parent_pointer.clone(), keywords);
    }
    strip_directives(schema);
    map
}

/// Removes every field whose name starts with [`DIRECTIVE_PREFIX`], defined
/// directive or not.
pub fn strip_directives(schema: &mut Value) {
    match schema {
        Value::Object(fields) => {
            fields.retain(|name, _| !name.starts_with(DIRECTIVE_PREFIX));
            for (_, child) in fields.iter_mut() {
                strip_directives(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_directives),
        _ => {}
    }
}

/// Checks that `schema`, once cleansed of directives, satisfies the store's
/// meta-schema. The schema itself is left untouched.
pub fn validate_schema<S: SchemaStore>(schema: &Value, store: &S) -> Result<bool, SchemaError> {
    let mut cleansed = schema.clone();
    strip_directives(&mut cleansed);
    let meta: Value = serde_json::from_str(&store.meta_schema()?)?;
    let meta_validator = report::compile(&meta)?;
    Ok(meta_validator.is_valid(&cleansed))
}
