//! Adapter over the JSON Schema engine. Findings are rendered as a report
//! tree: each node carries `schema.pointer`, `instance.pointer` and
//! `keyword`, and trees may nest further findings under a `reports` object.

use jsonschema::Validator;
use serde_json::{Value, json};

use crate::{error::SchemaError, pointer};

/// Compiles a cleansed schema into an engine validator.
pub fn compile(schema: &Value) -> Result<Validator, SchemaError> {
    jsonschema::validator_for(schema).map_err(|error| SchemaError::SchemaCompile(error.to_string()))
}

/// Runs `instance` against `validator` and renders every finding.
///
/// The engine reports the pointer of the violated keyword itself; the report
/// records its parent as `schema.pointer` (the schema object the keyword
/// lives in) and the keyword separately.
pub fn run(validator: &Validator, instance: &Value) -> Value {
    let findings: Vec<Value> = validator
        .iter_errors(instance)
        .map(|error| {
            let keyword_pointer = error.schema_path.to_string();
            let (schema_pointer, keyword) =
                pointer::split_last(&keyword_pointer).unwrap_or(("", keyword_pointer.as_str()));
            json!({
                "keyword": keyword,
                "schema": {"pointer": schema_pointer},
                "instance": {"pointer": error.instance_path.to_string()},
                "message": error.to_string(),
            })
        })
        .collect();
    json!({"success": findings.is_empty(), "findings": findings})
}

pub fn is_success(report: &Value) -> bool {
    report
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
