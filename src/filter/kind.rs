//! Filter kind definitions
//!
//! The set of filter kinds is closed: providers declare their filters
//! against this enum, so an unknown kind can never reach filter
//! construction. Clients that start from a string type tag resolve it
//! through a lookup table built once at startup.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SearchError};
use crate::filter::FilterValue;

/// Kind of a search filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    String,
    Bool,
}

/// Type tag -> kind
static FILTER_KINDS: Lazy<HashMap<&'static str, FilterKind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("string", FilterKind::String);
    map.insert("bool", FilterKind::Bool);
    map
});

impl FilterKind {
    /// Resolve a type tag to a kind
    ///
    /// Returns `None` for tags outside the registered set, so string-typed
    /// declarations are rejected where they enter, not when a filter is
    /// eventually constructed.
    pub fn from_tag(tag: &str) -> Option<Self> {
        FILTER_KINDS.get(tag).copied()
    }

    /// The type tag reported to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
        }
    }

    /// Whether the filter accepts multiple values
    pub fn multiple(&self) -> bool {
        match self {
            Self::String | Self::Bool => false,
        }
    }

    /// Parse and validate a raw client value
    ///
    /// String filters require a non-empty value. Bool filters accept the
    /// exact tokens `true`/`yes`/`y`/`1` and `false`/`no`/`n`/`0`/`""`.
    /// Anything else fails; invalid input is never coerced.
    pub fn parse(&self, raw: &str) -> Result<FilterValue> {
        match self {
            Self::String => {
                if raw.is_empty() {
                    return Err(SearchError::InvalidFilter {
                        value: raw.to_string(),
                    });
                }
                Ok(FilterValue::String(raw.to_string()))
            }
            Self::Bool => match raw {
                "true" | "yes" | "y" | "1" => Ok(FilterValue::Bool(true)),
                "false" | "no" | "n" | "0" | "" => Ok(FilterValue::Bool(false)),
                _ => Err(SearchError::InvalidFilter {
                    value: raw.to_string(),
                }),
            },
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
