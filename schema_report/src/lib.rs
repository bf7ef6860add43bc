//! Schema validation with human-readable messages carried inside the schema
//! itself. Schemas embed `$geoweb::messages` directives next to the keywords
//! they describe; [`messages::extract_messages`] lifts them out, the engine
//! validates the cleansed schema, and [`translate::translate`] turns the raw
//! report into messages keyed by instance pointer.

pub mod error;
pub mod harvest;
pub mod messages;
mod pointer;
pub mod report;
pub mod store;
pub mod translate;
