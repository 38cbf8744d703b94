//! Execution of one package-manager command in one directory.
//!
//! [`CommandLine`] describes what to run and where, built fluently the same way
//! for every manifest type. [`CommandRunner`] holds the run mode (dry-run,
//! verbose, optional search path) and turns a command line into a
//! [`RunStatus`] or an [`AutodepsError`]:
//!
//! - dry-run renders the invocation and never spawns a process
//! - a program missing from the search path is [`AutodepsError::ExecutableNotFound`]
//! - a spawn failure or non-zero exit is [`AutodepsError::CommandFailed`]
//!
//! Children inherit stdin, stdout and stderr so package-manager output streams
//! straight to the terminal. The runner awaits each child before returning, so
//! callers run commands strictly one after another.
//!
//! ```rust,no_run
//! use autodeps_cli::runner::{CommandLine, CommandRunner, RunStatus};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let runner = CommandRunner::new().dry_run(true);
//! let status = runner
//!     .run(&CommandLine::new("npm").arg("install").current_dir("/srv/web").label("NPM"))
//!     .await?;
//! assert_eq!(status, RunStatus::Simulated("npm install".to_string()));
//! # Ok(())
//! # }
//! ```

use colored::Colorize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::AutodepsError;

/// Program, arguments and working directory of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    current_dir: PathBuf,
    label: String,
}

impl CommandLine {
    /// Start a command line for `program`, running in the process directory.
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            label: program.clone(),
            program,
            args: Vec::new(),
            current_dir: PathBuf::from("."),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Directory the command runs in.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Human readable label used in log lines (defaults to the program name).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Program name as given.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments as given.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Working directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.current_dir
    }

    /// `program arg1 arg2 ...` with `program` replaced by `executable`.
    fn render_with(&self, executable: &str) -> String {
        std::iter::once(executable)
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_with(&self.program))
    }
}

/// Classification of a command that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The process ran and exited with status 0.
    Executed,
    /// Dry-run: the rendered invocation that would have been executed.
    Simulated(String),
}

/// Runs [`CommandLine`]s according to the scan mode.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    dry_run: bool,
    verbose: bool,
    search_path: Option<OsString>,
}

impl CommandRunner {
    /// A runner that executes commands found on `PATH`, printing only command names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render commands instead of executing them.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Print the resolved executable path and arguments before executing.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Look executables up in `path` instead of `PATH`.
    ///
    /// Children also receive `path` as their `PATH`, so composite shell commands
    /// resolve their programs the same way.
    #[must_use]
    pub fn search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// Locate `program` for a command running in `cwd`.
    pub fn resolve(&self, program: &str, cwd: &Path) -> Result<PathBuf, AutodepsError> {
        let found = match &self.search_path {
            Some(paths) => which::which_in(program, Some(paths), cwd),
            None => which::which(program),
        };
        found.map_err(|e| {
            tracing::debug!("Lookup of {} failed: {}", program, e);
            AutodepsError::ExecutableNotFound {
                command: program.to_string(),
            }
        })
    }

    /// Locate `program` in `first` before falling back to [`CommandRunner::resolve`].
    ///
    /// Used for programs that a composite shell command finds through a
    /// directory it prepends itself, such as a virtual environment's `bin`.
    pub fn resolve_preferring(
        &self,
        program: &str,
        first: &Path,
        cwd: &Path,
    ) -> Result<PathBuf, AutodepsError> {
        which::which_in(program, Some(first), cwd).or_else(|_| self.resolve(program, cwd))
    }

    /// Run (or simulate) one command and wait for it to finish.
    ///
    /// # Errors
    ///
    /// - [`AutodepsError::ExecutableNotFound`] when the program cannot be located
    /// - [`AutodepsError::CommandFailed`] when it cannot be spawned or exits non-zero
    pub async fn run(&self, command: &CommandLine) -> Result<RunStatus, AutodepsError> {
        if self.dry_run {
            let rendered = if self.verbose {
                match self.resolve(command.program(), command.dir()) {
                    Ok(path) => command.render_with(&path.display().to_string()),
                    Err(_) => command.to_string(),
                }
            } else {
                command.to_string()
            };
            println!("   {} {}", "Dry-run:".cyan(), rendered);
            return Ok(RunStatus::Simulated(rendered));
        }

        let executable = self.resolve(command.program(), command.dir())?;

        if self.verbose {
            println!(
                "   {} {}",
                "Executing:".cyan(),
                command.render_with(&executable.display().to_string())
            );
        } else {
            println!("   {} {}", "Executing:".cyan(), command.program());
        }

        tracing::debug!(
            "({}) Executing command: {} in {}",
            command.label,
            command.render_with(&executable.display().to_string()),
            command.dir().display()
        );

        let mut child = Command::new(&executable);
        child
            .args(command.arguments())
            .current_dir(command.dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(paths) = &self.search_path {
            child.env("PATH", paths);
        }

        let status = child.status().await.map_err(|e| AutodepsError::CommandFailed {
            command: command.program().to_string(),
            reason: format!("failed to start: {e}"),
        })?;

        if status.success() {
            tracing::debug!("({}) Command completed successfully", command.label);
            Ok(RunStatus::Executed)
        } else {
            tracing::debug!("({}) Command failed with exit code: {:?}", command.label, status.code());
            Err(AutodepsError::CommandFailed {
                command: command.program().to_string(),
                reason: status.to_string(),
            })
        }
    }
}
