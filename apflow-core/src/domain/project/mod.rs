// apflow-core/src/domain/project/mod.rs

pub mod configuration;

pub use configuration::{NetDueDateBasis, ProjectConfig, SourcePaths, TableNames};
