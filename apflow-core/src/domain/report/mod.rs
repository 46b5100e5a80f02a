// apflow-core/src/domain/report/mod.rs

pub mod manifest;
pub mod run;
pub mod summary;

pub use manifest::{Manifest, ManifestSource, ManifestStage};
pub use run::{CheckOutcome, CheckStatus, RunResult, StageOutcome};
pub use summary::{QualitySummary, VendorSummary};
