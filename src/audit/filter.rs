//! Path filter for audit trails

use std::collections::HashSet;

use super::change::FlatChange;

/// Set of change paths left out of audit trails
///
/// A pattern matches a path exactly, or, when written as `prefix.*`, every
/// path strictly below `prefix`.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    exact: HashSet<String>,
    prefixes: Vec<String>,
}

impl AuditFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for pattern in patterns {
            let pattern = pattern.into();
            match pattern.strip_suffix('*') {
                Some(prefix) if prefix.ends_with('.') => filter.prefixes.push(prefix.to_string()),
                _ => {
                    filter.exact.insert(pattern);
                }
            }
        }
        filter
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.exact.contains(path) || self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Drop ignored changes, keeping the order of the rest
    pub fn apply(&self, changes: Vec<FlatChange>) -> Vec<FlatChange> {
        changes
            .into_iter()
            .filter(|change| !self.is_ignored(&change.path))
            .collect()
    }
}
