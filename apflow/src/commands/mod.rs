// apflow/src/commands/mod.rs

pub mod clean;
pub mod generate;
pub mod inspect;
pub mod query;
pub mod run;
pub mod summary;

use anyhow::{Context, bail};
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::Path;
use tracing::debug;

use apflow_core::domain::project::ProjectConfig;
use apflow_core::infrastructure::adapters::DuckDBConnector;
use apflow_core::infrastructure::config::load_project_config;
use apflow_core::ports::QueryResult;

const IN_MEMORY: &str = ":memory:";

pub fn load_config(project_dir: &Path) -> anyhow::Result<ProjectConfig> {
    load_project_config(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })
}

/// `database-path` resolved against the project directory.
pub fn database_path(project_dir: &Path, config: &ProjectConfig) -> String {
    if config.database_path == IN_MEMORY {
        return IN_MEMORY.to_string();
    }
    let path = Path::new(&config.database_path);
    if path.is_absolute() {
        config.database_path.clone()
    } else {
        project_dir.join(path).to_string_lossy().into_owned()
    }
}

pub fn open_database(db_path: &str) -> anyhow::Result<DuckDBConnector> {
    debug!(path = db_path, "Opening DuckDB");
    DuckDBConnector::new(db_path).with_context(|| format!("Failed to initialize DuckDB at {}", db_path))
}

/// Read commands need the database a previous `apflow run` produced.
pub fn open_existing_database(project_dir: &Path, config: &ProjectConfig) -> anyhow::Result<DuckDBConnector> {
    let db_path = database_path(project_dir, config);
    if db_path != IN_MEMORY && !Path::new(&db_path).exists() {
        bail!(
            "❌ Database not found at: {}\n👉 Have you run 'apflow run'?",
            db_path
        );
    }
    open_database(&db_path)
}

pub fn result_table(result: &QueryResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(result.columns.clone());
    for row in &result.rows {
        table.add_row(row.iter().map(|v| v.as_deref().unwrap_or("NULL")));
    }
    table
}
