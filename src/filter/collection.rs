//! Validated filter values and per-invocation filter collections

use serde::Serialize;
use std::collections::HashMap;

use super::FilterKind;
use crate::error::Result;

/// A validated, typed filter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Bool(bool),
}

/// A named search constraint with a validated value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    kind: FilterKind,
    value: FilterValue,
}

impl Filter {
    /// Construct a filter of the given kind from a raw client value
    ///
    /// Fails with [`crate::SearchError::InvalidFilter`] when the raw value
    /// does not validate for the kind.
    pub fn new(kind: FilterKind, raw: &str) -> Result<Self> {
        Ok(Self {
            kind,
            value: kind.parse(raw)?,
        })
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// The string value, if this is a string filter
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            FilterValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// The boolean value, if this is a bool filter
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            FilterValue::Bool(value) => Some(value),
            _ => None,
        }
    }
}

/// The validated set of filters for one search invocation
///
/// Scoped to a single provider: the composer only inserts filters the
/// addressed provider declares support for. Lookup is by name; iteration
/// order carries no meaning.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterCollection {
    filters: HashMap<String, Filter>,
}

impl FilterCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a validated filter under a name
    pub fn insert(&mut self, name: impl Into<String>, filter: Filter) {
        self.filters.insert(name.into(), filter);
    }

    /// Look up a filter by name
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// The string value of a filter, if present and string-typed
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Filter::as_str)
    }

    /// The boolean value of a filter, if present and bool-typed
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Filter::as_bool)
    }

    /// Check if a filter name is present
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Iterate over name/filter pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.filters.iter().map(|(name, filter)| (name.as_str(), filter))
    }

    /// Number of filters in the collection
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn test_string_filter() {
        let filter = Filter::new(FilterKind::String, "report").unwrap();
        assert_eq!(filter.kind(), FilterKind::String);
        assert_eq!(filter.as_str(), Some("report"));
        assert_eq!(filter.as_bool(), None);
    }

    #[test]
    fn test_bool_filter() {
        let filter = Filter::new(FilterKind::Bool, "yes").unwrap();
        assert_eq!(filter.as_bool(), Some(true));
        assert_eq!(filter.as_str(), None);

        let filter = Filter::new(FilterKind::Bool, "0").unwrap();
        assert_eq!(filter.as_bool(), Some(false));
    }

    #[test]
    fn test_invalid_value_fails_construction() {
        let err = Filter::new(FilterKind::String, "").unwrap_err();
        match err {
            SearchError::InvalidFilter { value } => assert_eq!(value, ""),
            other => panic!("unexpected error: {other}"),
        }

        let err = Filter::new(FilterKind::Bool, "maybe").unwrap_err();
        match err {
            SearchError::InvalidFilter { value } => assert_eq!(value, "maybe"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collection_lookup() {
        let mut collection = FilterCollection::new();
        assert!(collection.is_empty());

        collection.insert("term", Filter::new(FilterKind::String, "invoice").unwrap());
        collection.insert("shared", Filter::new(FilterKind::Bool, "true").unwrap());

        assert_eq!(collection.len(), 2);
        assert!(collection.contains("term"));
        assert!(!collection.contains("group"));
        assert_eq!(collection.get_string("term"), Some("invoice"));
        assert_eq!(collection.get_bool("shared"), Some(true));
        assert_eq!(collection.get_string("shared"), None);
        assert_eq!(collection.get("group"), None);
    }

    #[test]
    fn test_collection_insert_overwrites() {
        let mut collection = FilterCollection::new();
        collection.insert("term", Filter::new(FilterKind::String, "old").unwrap());
        collection.insert("term", Filter::new(FilterKind::String, "new").unwrap());

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get_string("term"), Some("new"));
    }
}
