//! Core types shared across autodeps.
//!
//! Currently this is the error system: [`AutodepsError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting them on the CLI.

pub mod error;

pub use error::{AutodepsError, ErrorContext, user_friendly_error};
