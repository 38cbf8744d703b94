//! The `--scan` action: load configuration, walk the working directory, report.
//!
//! Flags are merged over the configuration file into [`ScanOptions`]:
//!
//! | Setting     | Flag        | Config key  | Default   |
//! |-------------|-------------|-------------|-----------|
//! | dry-run     | `--dry-run` |             | off       |
//! | verbose     | `--verbose` |             | off       |
//! | allow-list  | `--only`    | `only`      | all       |
//! | skip dirs   |             | `skip_dirs` | none      |
//! | venv dir    |             | `venv_dir`  | `.venv`   |
//! | interpreter |             | `python`    | `python3` |
//!
//! `--only` replaces the configured list rather than extending it.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::GlobalConfig;
use crate::core::AutodepsError;
use crate::filter::CategoryFilter;
use crate::scanner::{ScanOptions, Scanner};
use crate::summary::Summary;

/// One scan of the current working directory.
#[derive(Debug, Clone, Default)]
pub struct ScanCommand {
    /// Render commands without running them
    pub dry_run: bool,
    /// Print resolved command lines
    pub verbose: bool,
    /// Raw `--only` value
    pub only: Option<String>,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl ScanCommand {
    /// Scan the process working directory.
    ///
    /// # Errors
    ///
    /// [`AutodepsError::WorkingDirUnavailable`] when the working directory
    /// cannot be determined, or a configuration error.
    pub async fn execute(self) -> Result<Summary> {
        let root = std::env::current_dir().map_err(|e| AutodepsError::WorkingDirUnavailable {
            reason: e.to_string(),
        })?;
        self.execute_in(&root).await
    }

    /// Scan `root` and print the report.
    ///
    /// # Errors
    ///
    /// Fails only when the configuration cannot be loaded.
    pub async fn execute_in(self, root: &Path) -> Result<Summary> {
        let config = GlobalConfig::load_with_optional(self.config_path.clone()).await?;
        let options = self.options(&config);

        for entry in options.filter.unknown() {
            tracing::warn!("Unknown dependency type in allow-list: {}", entry);
            eprintln!(
                "{} Unknown dependency type '{}' (expected one of: go, npm, pnpm, yarn, pip, pipenv, conda)",
                "⚠".yellow(),
                entry
            );
        }

        println!("{} {}", "Scanning".bold(), root.display());
        if options.dry_run {
            println!("{}", "(dry-run: no commands will be executed)".dimmed());
        }
        println!();

        let summary = Scanner::new(options).scan(root).await;

        print!("{}", summary.render());
        Ok(summary)
    }

    /// Merge flags over the configuration file.
    fn options(&self, config: &GlobalConfig) -> ScanOptions {
        let mut options = ScanOptions::from_config(config);
        options.dry_run = self.dry_run;
        options.verbose = self.verbose;
        if let Some(only) = &self.only {
            options.filter = CategoryFilter::parse(only);
        }
        options
    }
}
