// apflow-core/src/domain/mod.rs

pub mod compiler;
pub mod error;
pub mod project;
pub mod report;
pub mod sap;
pub mod transform;

// Handy re-exports
pub use error::DomainError;
