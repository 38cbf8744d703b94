//! Category allow-list used by `--only`.

use std::collections::BTreeSet;

use crate::registry::Category;

/// Allow-list of category tags. An empty list allows everything.
///
/// ```rust,no_run
/// use autodeps_cli::filter::CategoryFilter;
///
/// let filter = CategoryFilter::parse("go, npm");
/// assert!(filter.allows("go"));
/// assert!(!filter.allows("pip"));
/// assert!(CategoryFilter::default().allows("pip"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    allowed: BTreeSet<String>,
}

impl CategoryFilter {
    /// Parse a comma-separated list. Entries are trimmed and empty entries dropped.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::from_entries(list.split(','))
    }

    /// Build a filter from individual entries (e.g. the `only` key of the config file).
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { allowed }
    }

    /// Whether a manifest of this category should be dispatched.
    #[must_use]
    pub fn allows(&self, category: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(category)
    }

    /// True when no allow-list is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Entries that do not name any registry category. They never match anything.
    #[must_use]
    pub fn unknown(&self) -> Vec<&str> {
        self.allowed
            .iter()
            .map(String::as_str)
            .filter(|entry| entry.parse::<Category>().is_err())
            .collect()
    }
}
