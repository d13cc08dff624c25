//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data file the store reads exists at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of `data_file` exists and seed the file with
/// an empty JSON array when it is missing. An existing file is left untouched.
pub async fn ensure_data_file(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    match tokio::fs::metadata(data_file).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => {
            warn!(path = %data_file.display(), "data path exists but is not a file");
            Err(anyhow::anyhow!("{} is not a regular file", data_file.display()))
        }
        Err(_) => {
            tokio::fs::write(data_file, b"[]")
                .await
                .map_err(|e| anyhow::anyhow!("cannot seed {}: {e}", data_file.display()))?;
            info!(path = %data_file.display(), "seeded empty todos document");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_missing_file_and_keeps_existing() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("todo_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("todos.json");

        ensure_data_file(&file).await?;
        assert_eq!(tokio::fs::read_to_string(&file).await?, "[]");

        tokio::fs::write(&file, br#"[{"username":"ana","todos":[]}]"#).await?;
        ensure_data_file(&file).await?;
        assert!(tokio::fs::read_to_string(&file).await?.contains("ana"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
