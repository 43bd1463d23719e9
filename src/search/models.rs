//! Search query and related data models

use crate::filter::{Filter, FilterCollection, FilterKind};
use crate::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters of the route the searching user is currently at
pub type RouteParameters = HashMap<String, serde_json::Value>;

/// Sort order requested for provider results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Relevance,
    DateDesc,
}

/// Opaque pagination cursor, a numeric offset or a provider-defined token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    Offset(i64),
    Token(String),
}

/// The user a search runs on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    uid: String,
    display_name: String,
}

impl User {
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Complete search query dispatched to a single provider
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    /// Validated filters for this invocation
    pub filters: FilterCollection,
    /// Requested sort order
    pub sort_order: SortOrder,
    /// Maximum number of entries to return
    pub limit: u32,
    /// Cursor from a previous, paginated result
    pub cursor: Option<Cursor>,
    /// Route the user is currently at
    pub route: String,
    /// Parameters of that route
    pub route_parameters: RouteParameters,
}

impl SearchQuery {
    /// Create a query from a validated filter collection
    pub fn new(filters: FilterCollection) -> Self {
        Self {
            filters,
            sort_order: SortOrder::default(),
            limit: DEFAULT_PAGE_SIZE,
            cursor: None,
            route: String::new(),
            route_parameters: RouteParameters::new(),
        }
    }

    /// Create a plain term query
    ///
    /// An empty term yields a query without a term filter.
    pub fn simple(term: &str) -> Self {
        let mut filters = FilterCollection::new();
        if let Ok(filter) = Filter::new(FilterKind::String, term) {
            filters.insert("term", filter);
        }
        Self::new(filters)
    }

    /// The search term, empty when no term filter is present
    pub fn term(&self) -> &str {
        self.filters.get_string("term").unwrap_or("")
    }

    /// Look up a filter by name
    pub fn filter(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// Set the sort order
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Continue a paginated search from a cursor
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Set the route context
    pub fn with_route(mut self, route: impl Into<String>, parameters: RouteParameters) -> Self {
        self.route = route.into();
        self.route_parameters = parameters;
        self
    }
}
