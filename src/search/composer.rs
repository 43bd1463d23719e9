//! Search composition across registered providers

use crate::error::{Result, SearchError};
use crate::filter::{Filter, FilterCollection, FilterKind};
use crate::provider::ProviderRegistry;
use crate::results::SearchResult;
use crate::search::{RouteParameters, SearchQuery, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Client-facing descriptor of one supported filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Type tag of the filter kind
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Whether multiple values are accepted
    pub multiple: bool,
}

/// Provider descriptor returned by [`SearchComposer::providers`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    /// Ordering value for client-side display sorting
    pub order: i64,
    /// IDs this provider answers under: its own plus any alternates
    pub triggers: Vec<String>,
    /// Supported filters by name
    pub filters: HashMap<String, FilterSpec>,
}

/// Queries individual providers and composes a unified search surface
///
/// The search process is split into two steps:
///
///   1. Get the list of providers (`providers`)
///   2. Query each provider of interest individually (`search`)
///
/// Fetching results from N providers is intentionally not parallelized
/// here. After step 1 the caller knows the full provider set and can issue
/// the per-provider calls concurrently, awaiting them all or showing
/// results as they come in. Each `search` call is independent and safe to
/// run concurrently with others once the one-time provider discovery has
/// finished.
pub struct SearchComposer {
    registry: Arc<ProviderRegistry>,
}

impl SearchComposer {
    /// Create a composer over a provider registry
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// List all providers for the consecutive calls to `search`
    ///
    /// Sorted ascending by `order`; equal orders keep discovery order, so
    /// identical inputs always produce an identical listing.
    pub fn providers(&self, route: &str, route_parameters: &RouteParameters) -> Vec<ProviderInfo> {
        self.registry.ensure_loaded();

        let mut providers: Vec<ProviderInfo> = self
            .registry
            .providers()
            .iter()
            .map(|provider| {
                let mut triggers = vec![provider.id().to_string()];
                triggers.extend(provider.alternate_ids());

                ProviderInfo {
                    id: provider.id().to_string(),
                    name: provider.name().to_string(),
                    order: provider.order(route, route_parameters),
                    triggers,
                    filters: filters_as_specs(provider.supported_filters()),
                }
            })
            .collect();

        providers.sort_by_key(|provider| provider.order);
        providers
    }

    /// Build the validated filter collection for one provider
    ///
    /// A filter name no provider declares is dropped silently, so clients
    /// may send filters that only newer providers understand. A name that
    /// is known globally but not supported by `provider_id` is rejected:
    /// the provider cannot silently ignore a filter it might support under
    /// a different identity. Raw values are validated by the
    /// provider-specific kind; validation failures propagate.
    pub fn build_filter_collection(
        &self,
        provider_id: &str,
        raw_filters: &HashMap<String, String>,
    ) -> Result<FilterCollection> {
        self.registry.ensure_loaded();

        let mut collection = FilterCollection::new();
        for (name, raw) in raw_filters {
            if !self.registry.knows_filter(name) {
                continue;
            }
            let kind = self
                .registry
                .filter_kind(name, provider_id)
                .ok_or_else(|| SearchError::InvalidFilter { value: raw.clone() })?;
            collection.insert(name.clone(), Filter::new(kind, raw)?);
        }

        Ok(collection)
    }

    /// Query an individual provider for results
    ///
    /// `provider_id` must be one of the IDs received from `providers`;
    /// anything else fails with [`SearchError::UnknownProvider`]. The
    /// provider's result is returned verbatim: no retries, no timeout, no
    /// shaping. Bounding a slow provider is the caller's responsibility.
    pub async fn search(
        &self,
        user: &User,
        provider_id: &str,
        query: &SearchQuery,
    ) -> Result<SearchResult> {
        self.registry.ensure_loaded();

        let provider = self
            .registry
            .get(provider_id)
            .ok_or_else(|| SearchError::UnknownProvider(provider_id.to_string()))?;

        debug!(provider = %provider_id, user = %user.uid(), "dispatching search");
        Ok(provider.search(user, query).await?)
    }
}

fn filters_as_specs(filters: HashMap<String, FilterKind>) -> HashMap<String, FilterSpec> {
    filters
        .into_iter()
        .map(|(name, kind)| {
            let spec = FilterSpec {
                kind,
                multiple: kind.multiple(),
            };
            (name, spec)
        })
        .collect()
}
