//! Python directories: virtual environment creation, activation and `pip install`.
//!
//! For a directory holding `requirements.txt` the scanner runs, in order:
//!
//! 1. `<python> -m venv <venv_dir>` when `<venv_dir>` does not exist yet
//! 2. `sh -c '. "$1/bin/activate" && pip install -r requirements.txt' sh <venv_dir>`
//!
//! The environment directory reaches the shell as a positional parameter, never
//! as part of the script. Step 2 is skipped when step 1 fails, and recorded as
//! "not found" when `pip` is neither in `<venv_dir>/bin` nor on the search path.
//! In dry-run mode both steps are only rendered and nothing is created on disk.

use colored::Colorize;
use std::path::Path;

use super::{Scanner, announce};
use crate::registry::{self, REQUIREMENTS_FILE};
use crate::runner::CommandLine;

const VENV_LABEL: &str = "Python (venv)";
const PIP: &str = "pip";

/// Shell script for step 2; `$1` is the environment directory.
fn install_script() -> String {
    format!(". \"$1/bin/activate\" && {PIP} install -r {REQUIREMENTS_FILE}")
}

impl Scanner {
    pub(super) async fn dispatch_python(&mut self, dir: &Path) {
        let label = registry::lookup(REQUIREMENTS_FILE).map_or("Python (pip)", |d| d.label);
        let venv_dir = self.options.venv_dir.clone();
        announce(REQUIREMENTS_FILE, label, dir);

        if dir.join(&venv_dir).is_dir() {
            tracing::debug!("Found {} in {}", venv_dir, dir.display());
        } else {
            println!("   {} {} not found, creating virtual environment", "⚙".cyan(), venv_dir);
            let create = CommandLine::new(self.options.python.clone())
                .args(["-m", "venv", venv_dir.as_str()])
                .current_dir(dir)
                .label(VENV_LABEL);
            if !self.execute(VENV_LABEL, dir, &create).await {
                return;
            }
        }

        if !self.options.dry_run {
            let venv_bin = dir.join(&venv_dir).join("bin");
            if let Err(e) = self.runner.resolve_preferring(PIP, &venv_bin, dir) {
                self.record_failure(label, dir, &e);
                return;
            }
        }

        let install = CommandLine::new("sh")
            .arg("-c")
            .arg(install_script())
            .arg("sh")
            .arg(venv_dir)
            .current_dir(dir)
            .label(label);
        self.execute(label, dir, &install).await;
    }
}
