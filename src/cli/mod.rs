//! Command-line interface for autodeps.
//!
//! autodeps has a single action selected by flags rather than subcommands:
//!
//! ```bash
//! # Install dependencies in every subproject below the current directory
//! autodeps --scan
//!
//! # See what would run, with resolved executable paths
//! autodeps --scan --dry-run --verbose
//!
//! # Only Go modules and npm projects
//! autodeps --scan --only go,npm
//! ```
//!
//! Without `--scan` the tool prints a hint and exits successfully.
//!
//! # Global Options
//!
//! - `--verbose` - print resolved command lines and enable debug logging
//! - `--config` - path to a configuration file (also `AUTODEPS_CONFIG`)

mod scan;

pub use scan::ScanCommand;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and programmatic callers can set up
/// logging without parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the `autodeps_cli` target when `RUST_LOG` is not set.
    ///
    /// `None` keeps logging limited to errors.
    pub log_level: Option<String>,

    /// Explicit configuration file, overriding `~/.autodeps/config.toml`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The log filter directive this configuration asks for.
    #[must_use]
    pub fn log_directive(&self) -> String {
        format!("autodeps_cli={}", self.log_level.as_deref().unwrap_or("error"))
    }

    /// Install the tracing subscriber. Logs go to stderr so they never mix
    /// with the scan report on stdout. `RUST_LOG` takes precedence when set.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_directive())
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure for autodeps.
#[derive(Parser, Debug)]
#[command(
    name = "autodeps",
    about = "Automatically install project dependencies",
    version,
    long_about = "Scans the current directory tree for dependency manifests (go.mod, package.json, \
                  pnpm-lock.yaml, yarn.lock, requirements.txt, Pipfile, environment.yml) and runs \
                  the matching package-manager install in each directory."
)]
pub struct Cli {
    /// Scan and install dependencies
    #[arg(long)]
    scan: bool,

    /// Only show what would be done
    ///
    /// Commands are rendered but never executed; virtual environments are not created.
    #[arg(long)]
    dry_run: bool,

    /// Show full command paths and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Comma-separated list of dependency types to run (go, npm, pnpm, yarn, pip, pipenv, conda)
    ///
    /// Overrides the `only` setting of the configuration file.
    #[arg(long, value_name = "TYPES")]
    only: Option<String>,

    /// Path to a configuration file
    #[arg(short, long, env = "AUTODEPS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Only startup failures are returned (unresolvable working directory,
    /// unreadable configuration). Failed installs are reported in the summary
    /// and do not make this return an error.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        CliConfig {
            log_level: self.verbose.then(|| "debug".to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        if !self.scan {
            println!("{} Use --scan to scan for project dependencies.", "ℹ".blue());
            return Ok(());
        }

        let command = ScanCommand {
            dry_run: self.dry_run,
            verbose: self.verbose,
            only: self.only,
            config_path: config.config_path,
        };
        command.execute().await.map(|_| ())
    }
}
