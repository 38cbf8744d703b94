//! Common test utilities for autodeps integration tests
//!
//! [`TestProject`] bundles a project tree, a directory of stub package managers
//! and an isolated home directory, and runs the built binary against them.

// Allow dead code because not every helper is used by every test module
#![allow(dead_code)]

use anyhow::{Context, Result};
use autodeps_cli::test_utils::{Invocation, ProjectTree, StubBin};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A project tree plus the environment the binary runs in.
pub struct TestProject {
    pub tree: ProjectTree,
    pub stubs: StubBin,
    home: TempDir,
}

impl TestProject {
    /// Create an empty project whose `PATH` holds only stubs and a real `sh`.
    pub fn new() -> Result<Self> {
        let stubs = StubBin::new()?;
        stubs.link_shell()?;
        Ok(Self {
            tree: ProjectTree::new()?,
            stubs,
            home: TempDir::new()?,
        })
    }

    /// Project root the binary runs in.
    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    /// Absolute path inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.tree.path(relative)
    }

    /// Home directory seen by the binary.
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Write `~/.autodeps/config.toml` for the binary.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let dir = self.home.path().join(".autodeps");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("config.toml");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// A preconfigured `assert_cmd` command for the binary.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_autodeps"));
        cmd.current_dir(self.root())
            .env("PATH", self.stubs.path())
            .env("HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("AUTODEPS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary and capture its output.
    pub fn run_autodeps(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_autodeps"))
            .args(args)
            .current_dir(self.root())
            .env("PATH", self.stubs.path())
            .env("HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("AUTODEPS_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run autodeps")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// Stub calls made so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.stubs.invocations().expect("Failed to read stub log")
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stdout does not contain the given text
    pub fn assert_stdout_not_contains(&self, text: &str) -> &Self {
        assert!(
            !self.stdout.contains(text),
            "Expected stdout not to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
