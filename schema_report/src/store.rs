use crate::error::StoreError;

/// Supplies schema text by name. Consulted read-only on every validation.
pub trait SchemaStore {
    fn latest_structural_schema(&self) -> Result<String, StoreError>;
    fn latest_enriched_schema(&self) -> Result<String, StoreError>;
    fn meta_schema(&self) -> Result<String, StoreError>;
}

/// In-memory store holding the three schema texts verbatim. Used by tests and
/// by embedders that load schema files themselves.
#[derive(Debug, Clone)]
pub struct StaticSchemaStore {
    pub structural: String,
    pub enriched: String,
    pub meta: String,
}

impl SchemaStore for StaticSchemaStore {
    fn latest_structural_schema(&self) -> Result<String, StoreError> {
        Ok(self.structural.clone())
    }

    fn latest_enriched_schema(&self) -> Result<String, StoreError> {
        Ok(self.enriched.clone())
    }

    fn meta_schema(&self) -> Result<String, StoreError> {
        Ok(self.meta.clone())
    }
}
