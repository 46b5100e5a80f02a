// apflow-core/src/infrastructure/extracts.rs

// Locating and writing the raw SAP CSV extracts.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::project::ProjectConfig;
use crate::domain::sap::SapTable;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExtract {
    pub table: SapTable,
    pub path: PathBuf,
}

/// Finds the three extracts. A configured path wins; when it does not exist
/// the data directory is searched for `<prefix>*.csv`.
pub fn resolve_extracts(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<Vec<ResolvedExtract>, InfrastructureError> {
    let data_dir = project_dir.join(&config.data_dir);

    SapTable::ALL
        .into_iter()
        .map(|table| {
            let configured = config.sources.get(table);
            let candidate = if configured.is_absolute() {
                configured.clone()
            } else {
                data_dir.join(configured)
            };

            if candidate.is_file() {
                return Ok(ResolvedExtract {
                    table,
                    path: candidate,
                });
            }

            warn!(
                table = table.sap_name(),
                path = ?candidate,
                "Configured extract missing, searching data directory"
            );
            match search_by_prefix(&data_dir, table.file_prefix()) {
                Some(path) => Ok(ResolvedExtract { table, path }),
                None => Err(InfrastructureError::SourceNotFound {
                    name: table.sap_name().to_string(),
                    looked_for: format!(
                        "{} or {}/{}*.csv",
                        candidate.display(),
                        data_dir.display(),
                        table.file_prefix()
                    ),
                }),
            }
        })
        .collect()
}

fn search_by_prefix(dir: &Path, prefix: &str) -> Option<PathBuf> {
    if !dir.exists() {
        return None;
    }
    let mut matches: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_lowercase();
            name.starts_with(prefix) && name.ends_with(".csv")
        })
        .map(|e| e.into_path())
        .collect();
    matches.sort();
    let found = matches.into_iter().next();
    debug!(prefix, found = ?found, "Extract search finished");
    found
}

/// Writes records as a CSV file with a header row. Returns the row count.
pub fn write_extract<T: Serialize>(path: &Path, records: &[T]) -> Result<usize, InfrastructureError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))?;
    atomic_write(path, bytes)?;
    Ok(records.len())
}
