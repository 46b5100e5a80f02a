// apflow-core/src/domain/report/manifest.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::project::NetDueDateBasis;
use crate::domain::sap::SapTable;
use crate::domain::transform::{StageKind, StageLayer};

/// Written to `target/manifest.json`: what a run reads and what it builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: String,
    pub version: String,
    pub engine: String,
    pub net_due_date_basis: NetDueDateBasis,
    pub sources: Vec<ManifestSource>,
    pub stages: Vec<ManifestStage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSource {
    pub table: SapTable,
    pub relation: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStage {
    pub name: String,
    pub kind: StageKind,
    pub layer: StageLayer,
    /// Relative to the target directory.
    pub compiled_path: PathBuf,
    /// Relations read by the stage's SELECT.
    pub upstream: Vec<String>,
}

impl Manifest {
    pub fn stage(&self, name: &str) -> Option<&ManifestStage> {
        self.stages.iter().find(|s| s.name == name)
    }
}
