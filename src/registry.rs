//! The manifest registry: which filenames autodeps recognizes and what it runs for them.
//!
//! The registry is pure data. Each recognized filename maps to a
//! [`ManifestDescriptor`] holding a display label, the install command line and
//! a [`Category`] tag used by `--only` filtering.
//!
//! | File               | Command                                   | Category |
//! |--------------------|-------------------------------------------|----------|
//! | `go.mod`           | `go mod download`                         | `go`     |
//! | `package.json`     | `npm install`                             | `npm`    |
//! | `pnpm-lock.yaml`   | `pnpm install`                            | `pnpm`   |
//! | `yarn.lock`        | `yarn install`                            | `yarn`   |
//! | `requirements.txt` | `pip install -r requirements.txt`         | `pip`    |
//! | `Pipfile`          | `pipenv install`                          | `pipenv` |
//! | `environment.yml`  | `conda env update --file environment.yml` | `conda`  |
//!
//! ```rust,no_run
//! use autodeps_cli::registry::{lookup, Category};
//!
//! let descriptor = lookup("go.mod").unwrap();
//! assert_eq!(descriptor.category, Category::Go);
//! assert_eq!(descriptor.command_line, &["go", "mod", "download"]);
//! assert!(lookup("README.md").is_none());
//! ```

use crate::core::AutodepsError;

/// Filename of the Python requirements list.
///
/// The scanner treats directories containing this file specially (virtual
/// environment creation and activation), see [`crate::scanner`].
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Package-manager family a manifest belongs to.
///
/// The string form (see [`Category::as_str`]) is what users pass to `--only`
/// and is matched exactly and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Go modules (`go.mod`)
    Go,
    /// npm (`package.json`)
    Npm,
    /// pnpm (`pnpm-lock.yaml`)
    Pnpm,
    /// Yarn (`yarn.lock`)
    Yarn,
    /// pip (`requirements.txt`)
    Pip,
    /// Pipenv (`Pipfile`)
    Pipenv,
    /// Conda (`environment.yml`)
    Conda,
}

impl Category {
    /// All categories in registry order.
    #[must_use]
    pub const fn all() -> &'static [Category] {
        &[
            Category::Go,
            Category::Npm,
            Category::Pnpm,
            Category::Yarn,
            Category::Pip,
            Category::Pipenv,
            Category::Conda,
        ]
    }

    /// Canonical tag used for filtering and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Go => "go",
            Category::Npm => "npm",
            Category::Pnpm => "pnpm",
            Category::Yarn => "yarn",
            Category::Pip => "pip",
            Category::Pipenv => "pipenv",
            Category::Conda => "conda",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = AutodepsError;

    /// Parses a category tag. Matching is exact: `"Go"` is not `go`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all().iter().copied().find(|category| category.as_str() == s).ok_or_else(
            || AutodepsError::Other {
                message: format!("Unknown dependency type '{s}'"),
            },
        )
    }
}

/// Static description of one recognized manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestDescriptor {
    /// Exact filename that triggers this descriptor
    pub match_filename: &'static str,
    /// Human readable label shown in output and the summary
    pub label: &'static str,
    /// Program followed by its arguments
    pub command_line: &'static [&'static str],
    /// Category tag for `--only` filtering
    pub category: Category,
}

impl ManifestDescriptor {
    /// The program to run (first token of the command line).
    #[must_use]
    pub fn program(&self) -> &'static str {
        self.command_line[0]
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &'static [&'static str] {
        &self.command_line[1..]
    }
}

const MANIFESTS: &[ManifestDescriptor] = &[
    ManifestDescriptor {
        match_filename: "go.mod",
        label: "Go",
        command_line: &["go", "mod", "download"],
        category: Category::Go,
    },
    ManifestDescriptor {
        match_filename: "package.json",
        label: "NPM",
        command_line: &["npm", "install"],
        category: Category::Npm,
    },
    ManifestDescriptor {
        match_filename: "pnpm-lock.yaml",
        label: "PNPM",
        command_line: &["pnpm", "install"],
        category: Category::Pnpm,
    },
    ManifestDescriptor {
        match_filename: "yarn.lock",
        label: "Yarn",
        command_line: &["yarn", "install"],
        category: Category::Yarn,
    },
    ManifestDescriptor {
        match_filename: REQUIREMENTS_FILE,
        label: "Python (pip)",
        command_line: &["pip", "install", "-r", REQUIREMENTS_FILE],
        category: Category::Pip,
    },
    ManifestDescriptor {
        match_filename: "Pipfile",
        label: "Pipenv",
        command_line: &["pipenv", "install"],
        category: Category::Pipenv,
    },
    ManifestDescriptor {
        match_filename: "environment.yml",
        label: "Conda",
        command_line: &["conda", "env", "update", "--file", "environment.yml"],
        category: Category::Conda,
    },
];

/// Every registered descriptor, in table order.
#[must_use]
pub fn descriptors() -> &'static [ManifestDescriptor] {
    MANIFESTS
}

/// Find the descriptor for a filename, if it is a recognized manifest.
#[must_use]
pub fn lookup(filename: &str) -> Option<&'static ManifestDescriptor> {
    MANIFESTS.iter().find(|descriptor| descriptor.match_filename == filename)
}
