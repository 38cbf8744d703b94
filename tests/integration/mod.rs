//! Integration test suite for autodeps
//!
//! These tests run the built `autodeps` binary against temporary project trees.
//! Package managers are replaced by shell-script stubs on an isolated `PATH`, so
//! the suite only runs on Unix.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: flag handling, hints and startup errors
//! - **config**: configuration file handling
//! - **scan**: end-to-end scans (dispatch, dry-run, filtering, Python venvs)

#![cfg(unix)]

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod config;
mod scan;
