//! autodeps - automatic dependency installation for multi-project trees
//!
//! autodeps walks a directory tree, recognizes dependency manifests and runs the
//! matching package-manager install command in each directory that holds one.
//! It is meant for monorepos and workspaces that mix ecosystems, where running
//! `npm install`, `go mod download` and `pip install` by hand in every
//! subproject gets tedious.
//!
//! The recognized manifests and their commands are listed in [`registry`].
//! Each directory is handled at most once; see [`scanner`] for the rules.
//!
//! # Modules
//!
//! - [`cli`] - argument parsing, logging setup and the scan command
//! - [`config`] - optional `~/.autodeps/config.toml`
//! - [`core`] - error types and user-facing error display
//! - [`filter`] - the `--only` allow-list
//! - [`registry`] - the manifest table and categories
//! - [`runner`] - running or simulating one external command
//! - [`scanner`] - the directory walk and per-directory dispatch
//! - [`summary`] - outcome records and the final report

pub mod cli;
pub mod config;
pub mod core;
pub mod filter;
pub mod registry;
pub mod runner;
pub mod scanner;
pub mod summary;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
