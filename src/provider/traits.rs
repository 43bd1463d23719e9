//! Provider traits and discovery contracts

use crate::filter::FilterKind;
use crate::results::SearchResult;
use crate::search::{RouteParameters, SearchQuery, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Main trait that all search providers must implement
///
/// Providers are registered by feature apps so they can contribute results
/// to the unified search. An app exposing more than one resource type
/// should register one provider per group.
///
/// The `alternate_ids` and `supported_filters` defaults reproduce the
/// behavior of providers that predate filter support: no aliases and a
/// single `term` filter of string kind.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Unique ID of the provider
    fn id(&self) -> &str;

    /// Translated display name of the provider
    fn name(&self) -> &str;

    /// Ordering value for the route the user is currently at
    ///
    /// Used purely for client-side display sorting of the provider list.
    fn order(&self, route: &str, route_parameters: &RouteParameters) -> i64;

    /// IDs of other providers this provider also answers under
    ///
    /// A provider can complete results of other providers, e.g. a
    /// full-text provider declaring `files` here is grouped under the
    /// `files` trigger next to the files provider itself.
    fn alternate_ids(&self) -> Vec<String> {
        Vec::new()
    }

    /// Declared filter support, filter name to kind
    ///
    /// A filter outside this map sent for this provider is rejected by the
    /// composer.
    fn supported_filters(&self) -> HashMap<String, FilterKind> {
        HashMap::from([("term".to_string(), FilterKind::String)])
    }

    /// Run this provider's search for one user and query
    async fn search(&self, user: &User, query: &SearchQuery) -> anyhow::Result<SearchResult>;
}

/// A provider registration declared by an app at bootstrap time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistration {
    /// Service identifier resolved through a [`ServiceResolver`]
    pub service_id: String,
    /// ID of the app that declared the registration
    pub app_id: String,
}

impl ProviderRegistration {
    pub fn new(service_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            app_id: app_id.into(),
        }
    }
}

/// Enumerates the provider registrations collected during bootstrap
pub trait RegistrationContext: Send + Sync {
    /// All declared search provider registrations
    ///
    /// Returns `None` while bootstrap has not finished; the registry treats
    /// that as "try again later", not as an empty provider set.
    fn search_providers(&self) -> Option<Vec<ProviderRegistration>>;
}

/// Resolves a registered service identifier to a provider instance
pub trait ServiceResolver: Send + Sync {
    /// Instantiate the provider behind a service identifier
    fn resolve(&self, service_id: &str) -> anyhow::Result<Arc<dyn SearchProvider>>;
}
