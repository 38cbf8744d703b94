//! Test utilities for autodeps
//!
//! Helpers shared by unit tests and the integration suite (via the
//! `test-utils` feature):
//! - [`init_test_logging`] installs a test-friendly tracing subscriber once
//! - [`StubBin`] fakes package managers with shell scripts that log their calls
//! - [`ProjectTree`] lays out a temporary project with manifest files
//!
//! # Example
//!
//! ```rust,no_run
//! use autodeps_cli::test_utils::{ProjectTree, StubBin};
//!
//! let tree = ProjectTree::new().unwrap();
//! tree.file("api/go.mod").unwrap();
//!
//! let stubs = StubBin::new().unwrap();
//! stubs.add("go", 0).unwrap();
//! ```

pub mod fixtures;
pub mod stub_bin;

pub use fixtures::ProjectTree;
pub use stub_bin::{Invocation, StubBin};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=autodeps_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
