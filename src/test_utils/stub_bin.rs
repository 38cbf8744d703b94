//! Fake package-manager executables for tests.
//!
//! Every stub appends `<working dir>|<name> <args>` to a shared log file and
//! exits with a fixed code, so tests can assert which commands ran, where, and
//! in which order without touching real package managers. Stubs only use shell
//! builtins (plus an absolute `mkdir` for the venv stub) so they work with a
//! `PATH` that contains nothing but the stub directory.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// One logged stub call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Canonicalized working directory of the call
    pub dir: PathBuf,
    /// Stub name followed by its arguments
    pub command: String,
}

/// Temporary directory of stub executables plus their call log.
pub struct StubBin {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    bin_dir: PathBuf,
    log_path: PathBuf,
}

impl StubBin {
    /// Create an empty stub directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let bin_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&bin_dir)?;
        let log_path = temp_dir.path().join("calls.log");
        Ok(Self {
            _temp_dir: temp_dir,
            bin_dir,
            log_path,
        })
    }

    /// Directory to use as the search path / `PATH`.
    pub fn path(&self) -> OsString {
        self.bin_dir.clone().into_os_string()
    }

    /// Add a stub named `name` that logs its call and exits with `exit_code`.
    pub fn add(&self, name: &str, exit_code: i32) -> Result<PathBuf> {
        let body = format!(
            "#!/bin/sh\necho \"$PWD|{name} $*\" >> \"{log}\"\nexit {exit_code}\n",
            log = self.log_path.display()
        );
        self.write_script(name, &body)
    }

    /// Add a `python`-like stub that also creates `<venv>/bin/activate` when
    /// called as `<name> -m venv <venv>`.
    pub fn add_venv_creator(&self, name: &str) -> Result<PathBuf> {
        let mkdir = which::which("mkdir").context("mkdir not available for venv stub")?;
        let body = format!(
            "#!/bin/sh\necho \"$PWD|{name} $*\" >> \"{log}\"\n\"{mkdir}\" -p \"$3/bin\" && : > \"$3/bin/activate\"\n",
            log = self.log_path.display(),
            mkdir = mkdir.display()
        );
        self.write_script(name, &body)
    }

    /// Make the real POSIX shell reachable as `sh` inside the stub directory.
    #[cfg(unix)]
    pub fn link_shell(&self) -> Result<()> {
        let sh = which::which("sh").context("sh not available")?;
        std::os::unix::fs::symlink(sh, self.bin_dir.join("sh"))?;
        Ok(())
    }

    /// Logged calls in the order they happened.
    pub fn invocations(&self) -> Result<Vec<Invocation>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.log_path)?;
        Ok(content
            .lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(dir, command)| Invocation {
                dir: fs::canonicalize(dir).unwrap_or_else(|_| PathBuf::from(dir)),
                command: command.trim_end().to_string(),
            })
            .collect())
    }

    #[cfg(unix)]
    fn write_script(&self, name: &str, body: &str) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir.join(name);
        fs::write(&path, body).with_context(|| format!("Failed to write stub {name}"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    #[cfg(not(unix))]
    fn write_script(&self, name: &str, _body: &str) -> Result<PathBuf> {
        anyhow::bail!("stub executables are only supported on Unix (requested {name})")
    }
}
