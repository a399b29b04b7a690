//! Temporary directories holding configuration files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary directory removed on drop.
///
/// # Examples
///
/// ```
/// use test_helpers::files::ConfigDir;
///
/// # fn main() -> anyhow::Result<()> {
/// let dir = ConfigDir::new()?;
/// let path = dir.write("app.toml", "[default]\nport = 8080\n")?;
/// assert!(path.is_file());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    /// Create an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary configuration directory")?;
        Ok(Self { dir })
    }

    /// Path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name`, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Remove `name` from the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.path(name);
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
    }
}
