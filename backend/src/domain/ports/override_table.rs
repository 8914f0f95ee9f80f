//! Caller-supplied disambiguation of generic uniqueness failures.

use std::collections::BTreeMap;

use crate::domain::DomainError;

/// Maps a backend disambiguation key to the domain error it stands for.
///
/// The key is an index name (matched as a substring of the driver message)
/// for MySQL and a constraint name (matched exactly) for Postgres. Entries are
/// kept in lexicographic key order, which is also the order substring matches
/// are attempted in.
///
/// Keys used for substring matching must not contain one another when they
/// mean different things; [`OverrideTable::overlapping_keys`] reports such
/// pairs so deployments can catch them before traffic does.
///
/// # Examples
/// ```
/// use domain_errors::domain::DomainError;
/// use domain_errors::domain::ports::OverrideTable;
///
/// let table = OverrideTable::new()
///     .with("idx_users_email", DomainError::DUPLICATE_EMAIL)
///     .with("idx_users_cpf", DomainError::DUPLICATE_CPF);
///
/// let message = "Duplicate entry 'a@b.c' for key 'users.idx_users_email'";
/// assert_eq!(
///     table.find_contained_in(message),
///     Some(&DomainError::DUPLICATE_EMAIL)
/// );
/// assert_eq!(table.get("idx_users_cpf"), Some(&DomainError::DUPLICATE_CPF));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, DomainError>,
}

impl OverrideTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, error: DomainError) -> Self {
        self.insert(key, error);
        self
    }

    /// Register `error` for `key`, returning the entry it replaced.
    pub fn insert(&mut self, key: impl Into<String>, error: DomainError) -> Option<DomainError> {
        self.entries.insert(key.into(), error)
    }

    /// Exact lookup by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DomainError> {
        self.entries.get(key)
    }

    /// First entry, in key order, whose key occurs inside `text`.
    #[must_use]
    pub fn find_contained_in(&self, text: &str) -> Option<&DomainError> {
        self.entries
            .iter()
            .find(|(key, _)| text.contains(key.as_str()))
            .map(|(_, error)| error)
    }

    /// Pairs `(inner, outer)` where `inner` is a substring of `outer` and the
    /// two keys map to different codes.
    #[must_use]
    pub fn overlapping_keys(&self) -> Vec<(&str, &str)> {
        let mut overlaps = Vec::new();
        for (inner, inner_error) in &self.entries {
            for (outer, outer_error) in &self.entries {
                if inner != outer && outer.contains(inner.as_str()) && inner_error != outer_error {
                    overlaps.push((inner.as_str(), outer.as_str()));
                }
            }
        }
        overlaps
    }

    /// Iterate over `(key, error)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainError)> {
        self.entries.iter().map(|(key, error)| (key.as_str(), error))
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, DomainError)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (K, DomainError)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, error)| (key.into(), error))
                .collect(),
        }
    }
}
