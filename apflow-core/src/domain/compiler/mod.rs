// apflow-core/src/domain/compiler/mod.rs

pub mod identifier;
pub mod relations;

pub use identifier::{quote_identifier, validate_identifier};
pub use relations::referenced_relations;
