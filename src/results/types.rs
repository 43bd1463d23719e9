//! Result type definitions

use crate::search::Cursor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Result of one provider search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Translated name of the result group
    pub name: String,
    /// Whether more entries can be fetched with the cursor
    pub is_paginated: bool,
    /// Result entries
    pub entries: Vec<SearchResultEntry>,
    /// Cursor for the next page, when paginated
    pub cursor: Option<Cursor>,
}

impl SearchResult {
    /// A complete result with no further pages
    pub fn complete(name: impl Into<String>, entries: Vec<SearchResultEntry>) -> Self {
        Self {
            name: name.into(),
            is_paginated: false,
            entries,
            cursor: None,
        }
    }

    /// A paginated result with a cursor for the next page
    pub fn paginated(
        name: impl Into<String>,
        entries: Vec<SearchResultEntry>,
        cursor: Cursor,
    ) -> Self {
        Self {
            name: name.into(),
            is_paginated: true,
            entries,
            cursor: Some(cursor),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the result carries no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One entry of a provider search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultEntry {
    /// URL of the entry thumbnail, empty for none
    pub thumbnail_url: String,
    /// Entry title
    pub title: String,
    /// Secondary line shown below the title
    pub subline: String,
    /// URL the entry links to
    pub resource_url: String,
    /// Parsed resource URL
    #[serde(skip)]
    pub parsed_url: Option<Url>,
    /// Icon CSS class
    pub icon: String,
    /// Whether the thumbnail is rendered rounded, e.g. for avatars
    pub rounded: bool,
    /// Additional entry attributes
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl SearchResultEntry {
    /// Create a new entry linking to a resource
    pub fn new(resource_url: impl Into<String>, title: impl Into<String>) -> Self {
        let resource_url = resource_url.into();
        let parsed_url = Url::parse(&resource_url).ok();

        Self {
            thumbnail_url: String::new(),
            title: title.into(),
            subline: String::new(),
            resource_url,
            parsed_url,
            icon: String::new(),
            rounded: false,
            attributes: HashMap::new(),
        }
    }

    /// Add a thumbnail
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }

    /// Add a subline
    pub fn with_subline(mut self, subline: impl Into<String>) -> Self {
        self.subline = subline.into();
        self
    }

    /// Set the icon class
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Render the thumbnail rounded
    pub fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Hostname of the resource URL
    pub fn hostname(&self) -> Option<&str> {
        self.parsed_url.as_ref().and_then(|u| u.host_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_result() {
        let result = SearchResult::complete("Files", vec![]);
        assert!(!result.is_paginated);
        assert!(result.cursor.is_none());
        assert!(result.is_empty());
    }

    #[test]
    fn test_paginated_result() {
        let entry = SearchResultEntry::new("https://cloud.example.com/f/42", "report.pdf");
        let result = SearchResult::paginated("Files", vec![entry], Cursor::Offset(5));

        assert!(result.is_paginated);
        assert_eq!(result.cursor, Some(Cursor::Offset(5)));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_entry_builder() {
        let entry = SearchResultEntry::new("https://cloud.example.com/f/42", "report.pdf")
            .with_thumbnail("https://cloud.example.com/thumb/42")
            .with_subline("Documents")
            .with_icon("icon-file")
            .rounded()
            .with_attribute("fileId", "42");

        assert_eq!(entry.title, "report.pdf");
        assert_eq!(entry.subline, "Documents");
        assert_eq!(entry.icon, "icon-file");
        assert!(entry.rounded);
        assert_eq!(entry.attributes.get("fileId").map(String::as_str), Some("42"));
        assert_eq!(entry.hostname(), Some("cloud.example.com"));
    }

    #[test]
    fn test_entry_with_unparsable_url() {
        let entry = SearchResultEntry::new("not a url", "broken");
        assert!(entry.parsed_url.is_none());
        assert_eq!(entry.hostname(), None);
    }

    #[test]
    fn test_result_serialization() {
        let entry = SearchResultEntry::new("https://cloud.example.com/f/42", "report.pdf");
        let result = SearchResult::complete("Files", vec![entry]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["name"], "Files");
        assert_eq!(json["is_paginated"], false);
        assert_eq!(json["entries"][0]["title"], "report.pdf");
        // The parsed URL is an internal convenience, not wire data
        assert!(json["entries"][0].get("parsed_url").is_none());
    }
}
