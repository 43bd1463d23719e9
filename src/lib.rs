//! Unified-Search-RS: a federated search composition layer written in Rust
//!
//! Aggregates heterogeneous search providers behind a uniform query/filter
//! contract: providers are discovered lazily through a registration context,
//! indexed by ID and alias, and queried one at a time through a composer
//! that validates per-provider filter support. Concurrency across providers
//! is deliberately left to the caller.

pub mod config;
pub mod error;
pub mod filter;
pub mod provider;
pub mod results;
pub mod search;

pub use config::Settings;
pub use error::SearchError;
pub use filter::{Filter, FilterCollection, FilterKind, FilterValue};
pub use provider::{ProviderRegistry, SearchProvider};
pub use results::{SearchResult, SearchResultEntry};
pub use search::{SearchComposer, SearchQuery, User};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of entries a provider returns per page
pub const DEFAULT_PAGE_SIZE: u32 = 5;
