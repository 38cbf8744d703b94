//! Error handling for autodeps
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`AutodepsError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for the CLI
//!
//! # Fatal vs. recorded errors
//!
//! Only two variants ever abort a run: [`AutodepsError::WorkingDirUnavailable`] and
//! [`AutodepsError::ConfigError`]. Everything else is raised for a single directory,
//! printed inline, and funneled into the scan [`Summary`](crate::summary::Summary).
//!
//! # Examples
//!
//! ```rust,no_run
//! use autodeps_cli::core::{AutodepsError, user_friendly_error};
//!
//! let error = AutodepsError::ExecutableNotFound {
//!     command: "pnpm".to_string(),
//! };
//! assert!(error.to_string().contains("not found"));
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored output on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for autodeps operations.
///
/// Every variant carries owned strings so errors can be cloned into the scan
/// summary and still be displayed after the walk finishes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutodepsError {
    /// The current working directory could not be resolved.
    ///
    /// This is the only failure of the scan itself that is fatal: without a root
    /// there is nothing to walk.
    #[error("Could not resolve the current working directory: {reason}")]
    WorkingDirUnavailable {
        /// Underlying OS error message
        reason: String,
    },

    /// A single filesystem entry could not be read during the walk.
    #[error("Cannot read {path}: {reason}")]
    Traversal {
        /// Path of the entry that failed (or the walk root if unknown)
        path: String,
        /// Underlying I/O error message
        reason: String,
    },

    /// The package-manager executable is absent from the search path.
    #[error("command not found: {command}")]
    ExecutableNotFound {
        /// Program name that was looked up
        command: String,
    },

    /// The child process could not be started, waited on, or exited non-zero.
    #[error("{command} failed: {reason}")]
    CommandFailed {
        /// Program name that was run
        command: String,
        /// Spawn error or exit status description
        reason: String,
    },

    /// The configuration file is unreadable or malformed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Catch-all for errors with no dedicated variant
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper that adds user-facing details and a suggestion.
///
/// ```rust,no_run
/// use autodeps_cli::core::{AutodepsError, ErrorContext};
///
/// let context = ErrorContext::new(AutodepsError::ConfigError {
///     message: "expected a table".to_string(),
/// })
/// .with_suggestion("Fix the syntax in ~/.autodeps/config.toml");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AutodepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AutodepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are printed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    ///
    /// Details are printed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a tailored suggestion.
///
/// Recognizes [`AutodepsError`] and [`std::io::Error`] anywhere in the error
/// chain; anything else is shown with its full context chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let has_context = error.chain().nth(1).is_some();
    for cause in error.chain() {
        if let Some(autodeps_error) = cause.downcast_ref::<AutodepsError>() {
            let context = create_error_context(autodeps_error.clone());
            return if has_context {
                context.with_details(format!("{error:#}"))
            } else {
                context
            };
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorContext::new(AutodepsError::Other {
                message: io_error.to_string(),
            })
            .with_suggestion("Check the permissions of the project directory"),
            _ => ErrorContext::new(AutodepsError::Other {
                message: io_error.to_string(),
            }),
        };
    }

    let message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(AutodepsError::Other { message });
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join(": "))
    }
}

fn create_error_context(error: AutodepsError) -> ErrorContext {
    match &error {
        AutodepsError::WorkingDirUnavailable { .. } => ErrorContext::new(error)
            .with_suggestion("Run autodeps from an existing, readable directory")
            .with_details("The scan is rooted at the current working directory"),
        AutodepsError::ExecutableNotFound { command } => {
            let suggestion = format!("Install '{command}' or add it to your PATH");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        AutodepsError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or point --config at another one")
            .with_details("Configuration is read from ~/.autodeps/config.toml or $AUTODEPS_CONFIG"),
        AutodepsError::Traversal { .. } => ErrorContext::new(error)
            .with_suggestion("Check file permissions and broken symlinks under the project"),
        _ => ErrorContext::new(error),
    }
}
