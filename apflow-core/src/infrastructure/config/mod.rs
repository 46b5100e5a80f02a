// apflow-core/src/infrastructure/config/mod.rs

pub mod project;

pub use crate::domain::project::ProjectConfig;
pub use project::{CONFIG_FILE_CANDIDATES, load_project_config};
