//! Result types produced by a scan run.

use crate::error::ScanError;
use crate::filter::is_parameter_name;
use std::collections::hash_set;
use std::collections::HashSet;

/// Deduplicated parameter names gathered across a run.
///
/// Every insertion goes through [`is_parameter_name`], so the set never holds
/// a token that fails the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    names: HashSet<String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token. Returns `true` if it was new and passed the filter.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if !is_parameter_name(&token) {
            return false;
        }
        self.names.insert(token)
    }

    /// Merge a batch of tokens, returning how many were new.
    pub fn merge<I, S>(&mut self, tokens: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tokens
            .into_iter()
            .fold(0, |added, token| added + usize::from(self.insert(token)))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.names.contains(token)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in lexical order, for stable output.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

impl IntoIterator for ParameterSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.merge(iter);
        set
    }
}

/// A top-level URL that contributed no tokens.
#[derive(Debug)]
pub struct UrlFailure {
    pub url: String,
    pub error: ScanError,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub parameters: ParameterSet,
    /// Failed top-level URLs, in input order.
    pub failures: Vec<UrlFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedups() {
        let mut set = ParameterSet::new();
        assert!(set.insert("user_id"));
        assert!(!set.insert("user_id"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_rejects_filtered_tokens() {
        let mut set = ParameterSet::new();
        assert!(!set.insert("foo-bar"));
        assert!(!set.insert("a_b_c_d"));
        assert!(!set.insert("abcdefghijklmnopqrst"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_merge_counts_new_names() {
        let mut set: ParameterSet = ["page", "q"].into_iter().collect();
        let added = set.merge(vec!["q", "sort", "bad-name"]);
        assert_eq!(added, 1);
        assert_eq!(set.to_sorted_vec(), vec!["page", "q", "sort"]);
    }
}
