// apflow-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path};
use tracing::info;

use crate::error::ApflowError;
use crate::infrastructure::config::project::load_project_config;
use crate::infrastructure::error::InfrastructureError;

/// Removes every clean target of the project. Returns the removed entries.
pub fn clean_project(project_dir: &Path) -> Result<Vec<String>, ApflowError> {
    info!("Initializing cleanup sequence");

    let config = load_project_config(project_dir).map_err(ApflowError::Infrastructure)?;

    let targets = if config.clean_targets.is_empty() {
        vec![config.target_path.clone()]
    } else {
        config.clean_targets
    };

    let mut removed = Vec::new();
    for target_rel_path in targets {
        // Path traversal guard: relative, no `..`
        let rel = Path::new(&target_rel_path);
        let escapes = rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes || target_rel_path.trim().is_empty() {
            return Err(ApflowError::UnsafePath(target_rel_path));
        }

        let full_path = project_dir.join(rel);
        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path).map_err(InfrastructureError::Io)?;
            } else {
                fs::remove_file(&full_path).map_err(InfrastructureError::Io)?;
            }
            info!(path = %target_rel_path, "Artifact removed");
            removed.push(target_rel_path);
        }
    }

    Ok(removed)
}
