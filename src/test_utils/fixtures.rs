//! Temporary project trees for scan tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory that manifests and folders can be added to.
pub struct ProjectTree {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
}

impl ProjectTree {
    /// Create an empty project root.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?.join("project");
        fs::create_dir_all(&root)?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Create an (empty) file, including parent directories.
    pub fn file(&self, relative: &str) -> Result<PathBuf> {
        self.file_with(relative, "")
    }

    /// Create a file with content, including parent directories.
    pub fn file_with(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Create a directory, including parents.
    pub fn dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}
