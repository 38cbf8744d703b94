//! The tree walker: finds manifests under a root and dispatches their install commands.
//!
//! # Walk order and deduplication
//!
//! Entries are visited once each, depth-first, in file-name order within every
//! directory, without following symlinks. A symlinked manifest never triggers
//! a dispatch. Each regular file is attributed to its
//! containing directory, and a directory is dispatched **at most once**: the
//! first qualifying file wins and every later file in the same directory is
//! ignored. A directory holding `go.mod` and `package.json` therefore only runs
//! `go mod download` (unless `--only` filters Go out).
//!
//! # Python directories
//!
//! A directory containing `requirements.txt` (with the `pip` category allowed)
//! always takes the Python path described in [`python`], never the generic
//! registry lookup: the virtual environment is created if missing, activated,
//! and `pip install -r requirements.txt` runs inside it.
//!
//! # Errors
//!
//! Nothing that happens during a walk aborts it. Unreadable entries and failing
//! commands are printed when they happen and recorded in the returned
//! [`Summary`].

mod python;

use colored::Colorize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::GlobalConfig;
use crate::core::AutodepsError;
use crate::filter::CategoryFilter;
use crate::registry::{self, Category, REQUIREMENTS_FILE};
use crate::runner::{CommandLine, CommandRunner, RunStatus};
use crate::summary::{OutcomeRecord, Summary};

/// Label used for traversal failures in the summary.
pub const SCAN_LABEL: &str = "scan";

/// Immutable settings for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Render commands instead of running them
    pub dry_run: bool,
    /// Show resolved executable paths
    pub verbose: bool,
    /// Category allow-list (empty allows everything)
    pub filter: CategoryFilter,
    /// Virtual environment directory name, relative to the manifest directory
    pub venv_dir: String,
    /// Interpreter used to create a missing virtual environment
    pub python: String,
    /// Directory names that are not descended into
    pub skip_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from_config(&GlobalConfig::default())
    }
}

impl ScanOptions {
    /// Options seeded from the configuration file; flags are applied on top by the caller.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            dry_run: false,
            verbose: false,
            filter: CategoryFilter::from_entries(&config.only),
            venv_dir: config.venv_dir.clone(),
            python: config.python.clone(),
            skip_dirs: config.skip_dirs.clone(),
        }
    }
}

/// Walks one root and owns the per-scan state (visited directories and outcomes).
pub struct Scanner {
    options: ScanOptions,
    runner: CommandRunner,
    visited: HashSet<PathBuf>,
    summary: Summary,
    dispatched: usize,
}

impl Scanner {
    /// Create a scanner whose runner follows the dry-run and verbose options.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        let runner = CommandRunner::new().dry_run(options.dry_run).verbose(options.verbose);
        Self {
            options,
            runner,
            visited: HashSet::new(),
            summary: Summary::new(),
            dispatched: 0,
        }
    }

    /// Resolve package managers in `path` instead of `PATH`.
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.runner = self.runner.search_path(path);
        self
    }

    /// Walk `root`, dispatching at most one install per directory, and return the outcomes.
    pub async fn scan(mut self, root: &Path) -> Summary {
        tracing::info!(
            "Scanning {} (dry_run={}, filter={:?})",
            root.display(),
            self.options.dry_run,
            self.options.filter
        );

        let skip_dirs = self.options.skip_dirs.clone();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !is_skipped_dir(entry, &skip_dirs));

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => self.visit_file(entry.path()).await,
                Ok(_) => {}
                Err(e) => self.record_traversal_error(root, &e),
            }
        }

        if self.dispatched == 0 {
            println!("{}", "No matching project files found.".yellow());
        }

        tracing::info!(
            "Scan finished: {} directories dispatched, {} records",
            self.dispatched,
            self.summary.records().len()
        );
        self.summary
    }

    async fn visit_file(&mut self, path: &Path) {
        let Some(dir) = path.parent().map(Path::to_path_buf) else {
            return;
        };

        if self.visited.contains(&dir) {
            tracing::trace!("Skipping {}: directory already handled", path.display());
            return;
        }

        if self.options.filter.allows(Category::Pip.as_str())
            && is_regular_file(&dir.join(REQUIREMENTS_FILE))
        {
            self.visited.insert(dir.clone());
            self.dispatched += 1;
            self.dispatch_python(&dir).await;
            return;
        }

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return;
        };
        let Some(descriptor) = registry::lookup(name) else {
            return;
        };
        if !self.options.filter.allows(descriptor.category.as_str()) {
            tracing::debug!(
                "Skipping {} in {}: category '{}' filtered out",
                name,
                dir.display(),
                descriptor.category
            );
            return;
        }

        self.visited.insert(dir.clone());
        self.dispatched += 1;
        announce(name, descriptor.label, &dir);

        let command = CommandLine::new(descriptor.program())
            .args(descriptor.args().iter().copied())
            .current_dir(&dir)
            .label(descriptor.label);
        self.execute(descriptor.label, &dir, &command).await;
    }

    /// Run one command and record its outcome. Returns false when it failed.
    async fn execute(&mut self, label: &str, dir: &Path, command: &CommandLine) -> bool {
        let record = match self.runner.run(command).await {
            Ok(RunStatus::Executed) => OutcomeRecord::Success {
                label: label.to_string(),
                directory: dir.to_path_buf(),
            },
            Ok(RunStatus::Simulated(rendered)) => OutcomeRecord::Skipped {
                label: label.to_string(),
                directory: dir.to_path_buf(),
                command: rendered,
            },
            Err(e) => {
                self.record_failure(label, dir, &e);
                return false;
            }
        };
        self.summary.record(record);
        true
    }

    fn record_failure(&mut self, label: &str, dir: &Path, error: &AutodepsError) {
        println!("   {} Error running {}: {}", "✗".red(), label, error);
        tracing::warn!("{} in {} failed: {}", label, dir.display(), error);
        self.summary.record(OutcomeRecord::Failure {
            label: label.to_string(),
            directory: dir.to_path_buf(),
            message: error.to_string(),
        });
    }

    fn record_traversal_error(&mut self, root: &Path, error: &walkdir::Error) {
        let path = error.path().unwrap_or(root).to_path_buf();
        let reason = error.io_error().map_or_else(|| error.to_string(), ToString::to_string);
        let error = AutodepsError::Traversal {
            path: path.display().to_string(),
            reason,
        };

        println!("{} {}", "⚠".yellow(), error);
        tracing::warn!("Walk error: {}", error);
        self.summary.record(OutcomeRecord::Failure {
            label: SCAN_LABEL.to_string(),
            directory: path,
            message: error.to_string(),
        });
    }
}

fn is_skipped_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| skip_dirs.iter().any(|skip| skip == name))
}

/// Like the walk itself, does not follow symlinks.
fn is_regular_file(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_file())
}

fn announce(file_name: &str, label: &str, dir: &Path) {
    println!("{} {} in {}", "Found".green().bold(), file_name, dir.display());
    println!("  {} → {}", label.bold(), dir.display());
}
