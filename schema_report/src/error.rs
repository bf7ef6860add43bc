use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema text is not valid JSON: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("schema does not compile: {0}")]
    SchemaCompile(String),
    #[error("schema store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("schema {0:?} is not available")]
    Missing(&'static str),
    #[error("system input/output error: {0}")]
    IoError(#[from] std::io::Error),
}
