//! Directories (CABINET)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Pattern;
use crate::error::{Result, StdlibError};

/// A directory path with listing and lifecycle operations.
#[derive(Debug, Clone)]
pub struct Cabinet {
    path: PathBuf,
}

impl Cabinet {
    /// Describe a directory; nothing is touched yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the path exists and is a directory.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path)
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Entry names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(&self.path).map_err(|e| StdlibError::io("Failed to read directory", e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StdlibError::io("Failed to read directory", e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Create the directory and any missing parents.
    pub fn create(&self) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(&self.path)
            .map_err(|e| StdlibError::io("Failed to create directory", e))?;
        debug!(path = %self.path.display(), "cabinet created");
        Ok(())
    }

    /// Remove the directory, which must be empty.
    pub fn delete(&self) -> Result<()> {
        fs::remove_dir(&self.path).map_err(|e| StdlibError::io("Failed to delete directory", e))
    }

    /// Remove the directory and everything under it.
    pub fn delete_all(&self) -> Result<()> {
        fs::remove_dir_all(&self.path)
            .map_err(|e| StdlibError::io("Failed to delete directory and its contents", e))?;
        debug!(path = %self.path.display(), "cabinet removed recursively");
        Ok(())
    }

    /// Sorted entry names matching a shell-style pattern.
    pub fn find(&self, pattern: &str) -> Result<Vec<String>> {
        let pattern = Pattern::new(pattern)?;
        Ok(self
            .list()?
            .into_iter()
            .filter(|name| pattern.matches(name))
            .collect())
    }
}
