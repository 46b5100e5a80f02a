// apflow-core/src/ports/mod.rs

pub mod connector;

#[cfg(test)]
pub(crate) mod mock;

pub use connector::{ColumnSchema, Connector, QueryResult};
