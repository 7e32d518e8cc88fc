//! Blocked domain set: normalized, de-duplicated, sorted.

use std::collections::BTreeSet;

/// Domains seeded into a fresh install.
pub const DEFAULT_DOMAINS: &[&str] = &["example.com", "badsite.com"];

/// Lowercase host names mapped to the block address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    domains: BTreeSet<String>,
}

/// Trim and lowercase a user-supplied host name. Empty input yields `None`.
pub fn normalize(raw: &str) -> Option<String> {
    let d = raw.trim().to_lowercase();
    if d.is_empty() {
        None
    } else {
        Some(d)
    }
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        DEFAULT_DOMAINS.iter().copied().collect()
    }

    /// Insert a domain. Returns false when empty or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize(raw) {
            Some(d) => self.domains.insert(d),
            None => false,
        }
    }

    /// Remove a domain. Returns false when it was not present.
    pub fn remove(&mut self, raw: &str) -> bool {
        match normalize(raw) {
            Some(d) => self.domains.remove(&d),
            None => false,
        }
    }

    pub fn contains(&self, raw: &str) -> bool {
        normalize(raw).is_some_and(|d| self.domains.contains(&d))
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Domains in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.domains.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DomainSet::new();
        for d in iter {
            set.insert(d.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for DomainSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for d in iter {
            self.insert(d.as_ref());
        }
    }
}
