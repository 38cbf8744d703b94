//! autodeps CLI entry point
//!
//! Parses arguments, runs the scan and turns startup errors into a colored
//! message with a suggestion. Individual install failures never change the
//! exit status; they are reported in the summary.

use anyhow::Result;
use autodeps_cli::cli;
use autodeps_cli::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
