// apflow-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` through a temp file in the same directory, then
/// renames it into place. Readers see the old file or the new one, never a
/// half-written artifact. Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Pretty JSON artifact (manifest, run results).
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), InfrastructureError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| InfrastructureError::ConfigError(format!("Serialization: {}", e)))?;
    atomic_write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_missing_dirs() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("compiled/staging/accounts_payable_staging.sql");

        atomic_write(&file_path, "SELECT 1")?;

        assert_eq!(fs::read_to_string(file_path)?, "SELECT 1");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("run_results.json");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }

    #[test]
    fn test_write_json_is_pretty() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("manifest.json");

        write_json(&file_path, &serde_json::json!({ "stages": ["a"] }))?;

        let content = fs::read_to_string(file_path)?;
        assert!(content.contains("\n  \"stages\""));
        Ok(())
    }
}
