//! Two-pass orchestration: structural schema, enrichment, enriched schema,
//! merged error map.

use schema_report::{
    messages::{self, MessageMap},
    report,
    store::SchemaStore,
    translate::{self, ErrorMap},
};
use serde_json::{Value, json};

use crate::{cleanup, enrich, error::TafResult, result::TafReport};

/// Domain objects that can hand over their JSON form for validation.
pub trait TafSource {
    fn to_json(&self) -> Value;
}

/// Validates TAF documents against the store's structural and enriched
/// schemas, running enrichment in between. Pure: a call never mutates the
/// validator, and identical input yields an identical report.
pub struct TafValidator<S> {
    store: S,
}

struct Pass {
    raw: Value,
    errors: ErrorMap,
}

impl<S: SchemaStore> TafValidator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all)]
    pub fn validate_text(&self, taf: &str) -> TafResult<TafReport> {
        match serde_json::from_str::<Value>(taf) {
            Ok(document) => self.validate(&document),
            Err(error) => {
                tracing::warn!(%error, "TAF text is not valid JSON");
                Ok(TafReport::failure(
                    json!({"message": "Could not parse TAF"}),
                    None,
                    None,
                ))
            }
        }
    }

    pub fn validate_object(&self, taf: &impl TafSource) -> TafResult<TafReport> {
        self.validate(&taf.to_json())
    }

    #[tracing::instrument(skip_all)]
    pub fn validate(&self, taf: &Value) -> TafResult<TafReport> {
        let mut document = taf.clone();
        cleanup::scrub_changegroups(&mut document);

        let structural = self.run_pass(&self.store.latest_structural_schema()?, &document);
        tracing::debug!("structural pass done");
        enrich::enrich(&mut document);
        let enriched = self.run_pass(&self.store.latest_enriched_schema()?, &document);
        tracing::debug!("enriched pass done");

        let (Some(structural), Some(enriched)) = (structural, enriched) else {
            return Ok(TafReport::failure(
                json!({"message": "Validation report was null"}),
                None,
                None,
            ));
        };

        if report::is_success(&structural.raw) && report::is_success(&enriched.raw) {
            return Ok(TafReport::success(structural.raw, enriched.raw));
        }

        let mut merged = structural.errors;
        for (instance_pointer, messages) in enriched.errors {
            let slot = merged.entry(instance_pointer).or_default();
            for message in messages {
                if !slot.contains(&message) {
                    slot.push(message);
                }
            }
        }
        let errors = Value::Object(
            merged
                .into_iter()
                .map(|(instance_pointer, messages)| {
                    (
                        instance_pointer,
                        Value::Array(messages.into_iter().map(Value::String).collect()),
                    )
                })
                .collect(),
        );
        Ok(TafReport::failure(
            errors,
            Some(structural.raw),
            Some(enriched.raw),
        ))
    }

    /// Checks a schema against the store's meta-schema, directives stripped.
    pub fn validate_schema(&self, schema: &Value) -> TafResult<bool> {
        Ok(messages::validate_schema(schema, &self.store)?)
    }

    /// One schema pass. A schema that does not parse or compile produces no
    /// report at all, which the caller turns into a synthetic failure.
    fn run_pass(&self, schema_text: &str, document: &Value) -> Option<Pass> {
        let mut schema: Value = match serde_json::from_str(schema_text) {
            Ok(schema) => schema,
            Err(error) => {
                tracing::warn!(%error, "schema text is not valid JSON");
                return None;
            }
        };
        let message_map: MessageMap = messages::extract_messages(&mut schema);
        let validator = match report::compile(&schema) {
            Ok(validator) => validator,
            Err(error) => {
                tracing::warn!(%error, "schema does not compile");
                return None;
            }
        };
        let raw = report::run(&validator, document);
        let errors = translate::translate(&raw, &message_map);
        Some(Pass { raw, errors })
    }
}
