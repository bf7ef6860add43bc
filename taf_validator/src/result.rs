use serde::Serialize;
use serde_json::Value;

/// Outcome of a full validation run. `errors` maps instance pointers to the
/// messages collected for them and is present exactly when the run failed.
/// The raw reports of both passes are carried for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TafReport {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_report: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enriched_report: Option<Value>,
}

impl TafReport {
    pub fn success(structural_report: Value, enriched_report: Value) -> Self {
        Self {
            succeeded: true,
            errors: None,
            structural_report: Some(structural_report),
            enriched_report: Some(enriched_report),
        }
    }

    pub fn failure(
        errors: Value,
        structural_report: Option<Value>,
        enriched_report: Option<Value>,
    ) -> Self {
        Self {
            succeeded: false,
            errors: Some(errors),
            structural_report,
            enriched_report,
        }
    }
}
