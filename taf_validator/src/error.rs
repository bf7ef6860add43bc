use schema_report::error::{SchemaError, StoreError};
use thiserror::Error;

pub type TafResult<T> = Result<T, TafError>;

#[derive(Debug, Error)]
pub enum TafError {
    #[error("schema handling error: {0}")]
    Schema(#[from] SchemaError),
    #[error("schema store error: {0}")]
    Store(#[from] StoreError),
    #[error("modulus must be positive, got {0}")]
    InvalidModulus(i64),
}
