//! Scan outcome collection and the end-of-run report.

use colored::Colorize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Result of one dispatch (or one failed traversal step) during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeRecord {
    /// The command ran and exited successfully.
    Success {
        /// Descriptor label, e.g. `Go`
        label: String,
        /// Working directory of the command
        directory: PathBuf,
    },
    /// The command could not be run, or ran and failed.
    Failure {
        /// Descriptor label, or `scan` for traversal errors
        label: String,
        /// Working directory of the command, or the unreadable path
        directory: PathBuf,
        /// Error message (contains "not found" for missing executables)
        message: String,
    },
    /// Dry-run: the command was rendered but not executed.
    Skipped {
        /// Descriptor label
        label: String,
        /// Working directory the command would run in
        directory: PathBuf,
        /// Rendered command line
        command: String,
    },
}

impl OutcomeRecord {
    /// Directory this record refers to.
    #[must_use]
    pub fn directory(&self) -> &Path {
        match self {
            Self::Success { directory, .. }
            | Self::Failure { directory, .. }
            | Self::Skipped { directory, .. } => directory,
        }
    }

    /// Label of the action this record refers to.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Success { label, .. } | Self::Failure { label, .. } | Self::Skipped { label, .. } => {
                label
            }
        }
    }
}

/// Ordered, append-only collection of [`OutcomeRecord`]s for one scan.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    records: Vec<OutcomeRecord>,
}

impl Summary {
    /// Create an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&mut self, record: OutcomeRecord) {
        self.records.push(record);
    }

    /// All records in the order they were appended.
    #[must_use]
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Successful dispatches.
    pub fn successes(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(|r| matches!(r, OutcomeRecord::Success { .. }))
    }

    /// Dry-run entries.
    pub fn skipped(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(|r| matches!(r, OutcomeRecord::Skipped { .. }))
    }

    /// Failures, including traversal errors.
    pub fn failures(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(|r| matches!(r, OutcomeRecord::Failure { .. }))
    }

    /// True when nothing was recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when at least one failure was recorded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Render the report: successes, skipped, failures (empty sections omitted),
    /// followed by a "No errors" notice when nothing failed.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Summary".bold());

        let successes: Vec<_> = self.successes().collect();
        if !successes.is_empty() {
            let _ = writeln!(out, "{} Installed ({}):", "✓".green(), successes.len());
            for record in successes {
                let _ = writeln!(out, "  • {} → {}", record.label(), record.directory().display());
            }
        }

        let skipped: Vec<_> = self.skipped().collect();
        if !skipped.is_empty() {
            let _ = writeln!(out, "{} Skipped (dry-run) ({}):", "○".cyan(), skipped.len());
            for record in skipped {
                if let OutcomeRecord::Skipped { label, directory, command } = record {
                    let _ = writeln!(out, "  • {label} → {}: {command}", directory.display());
                }
            }
        }

        let failures: Vec<_> = self.failures().collect();
        if failures.is_empty() {
            let _ = writeln!(out, "{} No errors encountered.", "✓".green());
        } else {
            let _ = writeln!(out, "{} Failed ({}):", "✗".red(), failures.len());
            for record in failures {
                if let OutcomeRecord::Failure { label, directory, message } = record {
                    let _ = writeln!(out, "  • {label} → {}: {message}", directory.display());
                }
            }
        }

        out
    }
}
