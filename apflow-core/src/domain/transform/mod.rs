// apflow-core/src/domain/transform/mod.rs

pub mod casting;
pub mod plan;
pub mod rules;
pub mod sql;

pub use plan::{StageDefinition, StageKind, StageLayer, StagePlan};
