//! Configuration management for autodeps
//!
//! autodeps works without any configuration. An optional TOML file lets users
//! set defaults that would otherwise have to be repeated on every invocation.
//!
//! # Location
//!
//! - `--config <path>` or `AUTODEPS_CONFIG` when given (the file must exist)
//! - otherwise `~/.autodeps/config.toml` (Windows: `%LOCALAPPDATA%\autodeps\config.toml`),
//!   silently skipped when absent
//!
//! # Format
//!
//! ```toml
//! # Default allow-list when --only is not passed
//! only = ["go", "npm"]
//!
//! # Directory names the walk never descends into
//! skip_dirs = ["node_modules", ".git"]
//!
//! # Python virtual environment handling
//! venv_dir = ".venv"
//! python = "python3"
//! ```

pub mod global;

pub use global::GlobalConfig;
