//! Provider registry with one-shot lazy discovery

use super::traits::{ProviderRegistration, RegistrationContext, SearchProvider, ServiceResolver};
use crate::config::Settings;
use crate::filter::FilterKind;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info};

/// Indexes built from one discovery pass
struct RegistryIndex {
    /// Providers by ID, in discovery order
    providers: IndexMap<String, Arc<dyn SearchProvider>>,
    /// Alias -> IDs of the providers answering under it
    handlers: IndexMap<String, Vec<String>>,
    /// Filter name -> declared kind per provider ID
    filters: HashMap<String, HashMap<String, FilterKind>>,
}

/// Registry of all discovered search providers
///
/// Discovery runs at most once per registry lifetime, on first access. If
/// the registration context reports that bootstrap has not finished, the
/// registry stays unloaded and the next access retries. There is no reset;
/// a fresh registry is the only way to re-discover.
pub struct ProviderRegistry {
    context: Arc<dyn RegistrationContext>,
    resolver: Arc<dyn ServiceResolver>,
    settings: Settings,
    /// `None` until discovery succeeded
    index: RwLock<Option<RegistryIndex>>,
}

impl ProviderRegistry {
    /// Create an unloaded registry over the discovery collaborators
    pub fn new(
        context: Arc<dyn RegistrationContext>,
        resolver: Arc<dyn ServiceResolver>,
        settings: Settings,
    ) -> Self {
        Self {
            context,
            resolver,
            settings,
            index: RwLock::new(None),
        }
    }

    /// Run provider discovery unless it already happened
    ///
    /// Idempotent. Concurrent first access is serialized on the write lock
    /// and double-checked, so providers are resolved exactly once.
    pub fn ensure_loaded(&self) {
        if self.index.read().unwrap().is_some() {
            return;
        }

        let mut slot = self.index.write().unwrap();
        if slot.is_some() {
            // Lost the race, another caller finished the load
            return;
        }

        let Some(registrations) = self.context.search_providers() else {
            // Too early, nothing registered yet; stay unloaded so a later
            // call retries once bootstrap finished
            debug!("registration context not ready, skipping provider discovery");
            return;
        };

        *slot = Some(self.load(&registrations));
    }

    /// Resolve every registration and build the indexes
    ///
    /// A provider that fails to resolve is logged and skipped; the
    /// remaining registrations still load.
    fn load(&self, registrations: &[ProviderRegistration]) -> RegistryIndex {
        let mut providers: IndexMap<String, Arc<dyn SearchProvider>> = IndexMap::new();
        let mut handlers: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut filters: HashMap<String, HashMap<String, FilterKind>> = HashMap::new();

        for registration in registrations {
            let provider = match self.resolver.resolve(&registration.service_id) {
                Ok(provider) => provider,
                Err(e) => {
                    error!(
                        app = %registration.app_id,
                        service = %registration.service_id,
                        error = %e,
                        "could not load search provider"
                    );
                    continue;
                }
            };

            let id = provider.id().to_string();
            if self.settings.disabled_providers.iter().any(|p| p == &id) {
                info!(provider = %id, "skipping disabled search provider");
                continue;
            }

            handlers.insert(id.clone(), vec![id.clone()]);
            providers.insert(id, provider);
        }

        for (id, provider) in &providers {
            for (name, kind) in provider.supported_filters() {
                filters.entry(name).or_default().insert(id.clone(), kind);
            }
        }

        for (id, provider) in &providers {
            for alternate in provider.alternate_ids() {
                handlers.entry(alternate).or_default().push(id.clone());
            }
        }

        info!(count = providers.len(), "loaded search providers");

        RegistryIndex {
            providers,
            handlers,
            filters,
        }
    }

    /// Whether discovery has completed
    pub fn is_loaded(&self) -> bool {
        self.index.read().unwrap().is_some()
    }

    /// The effective settings the registry was created with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All providers, in discovery order
    ///
    /// Empty while the registry is unloaded.
    pub fn providers(&self) -> Vec<Arc<dyn SearchProvider>> {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .map(|index| index.providers.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Look up a provider by ID
    pub fn get(&self, id: &str) -> Option<Arc<dyn SearchProvider>> {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .and_then(|index| index.providers.get(id).cloned())
    }

    /// Check if a provider ID is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .is_some_and(|index| index.providers.contains_key(id))
    }

    /// Whether any provider declared the filter name
    pub fn knows_filter(&self, name: &str) -> bool {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .is_some_and(|index| index.filters.contains_key(name))
    }

    /// The kind a specific provider declared for a filter name
    pub fn filter_kind(&self, name: &str, provider_id: &str) -> Option<FilterKind> {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .and_then(|index| index.filters.get(name))
            .and_then(|by_provider| by_provider.get(provider_id))
            .copied()
    }

    /// Provider IDs answering under an alias
    ///
    /// Informational metadata: every provider seeds its own ID, and
    /// alternate IDs append the declaring provider. Dispatch still always
    /// addresses a single provider ID.
    pub fn handlers(&self, alias: &str) -> Vec<String> {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .and_then(|index| index.handlers.get(alias).cloned())
            .unwrap_or_default()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .map(|index| index.providers.len())
            .unwrap_or(0)
    }

    /// Check if no providers are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{BootstrapContext, StaticResolver};
    use crate::results::SearchResult;
    use crate::search::{RouteParameters, SearchQuery, User};
    use async_trait::async_trait;

    struct StubProvider {
        id: &'static str,
        alternates: Vec<String>,
        filters: Option<HashMap<String, FilterKind>>,
    }

    impl StubProvider {
        fn new(id: &'static str) -> Self {
            Self {
                id,
                alternates: Vec::new(),
                filters: None,
            }
        }

        fn with_alternates(mut self, alternates: &[&str]) -> Self {
            self.alternates = alternates.iter().map(|a| a.to_string()).collect();
            self
        }

        fn with_filters(mut self, filters: &[(&str, FilterKind)]) -> Self {
            self.filters = Some(
                filters
                    .iter()
                    .map(|(name, kind)| (name.to_string(), *kind))
                    .collect(),
            );
            self
        }
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.id
        }

        fn order(&self, _route: &str, _route_parameters: &RouteParameters) -> i64 {
            0
        }

        fn alternate_ids(&self) -> Vec<String> {
            self.alternates.clone()
        }

        fn supported_filters(&self) -> HashMap<String, FilterKind> {
            match &self.filters {
                Some(filters) => filters.clone(),
                None => HashMap::from([("term".to_string(), FilterKind::String)]),
            }
        }

        async fn search(&self, _user: &User, _query: &SearchQuery) -> anyhow::Result<SearchResult> {
            Ok(SearchResult::complete(self.id, vec![]))
        }
    }

    fn registry_with(
        providers: Vec<StubProvider>,
        settings: Settings,
    ) -> (Arc<BootstrapContext>, ProviderRegistry) {
        let context = Arc::new(BootstrapContext::new());
        let resolver = Arc::new(StaticResolver::new());
        for provider in providers {
            let service_id = format!("App\\Search\\{}", provider.id);
            context.register_search_provider(&service_id, provider.id);
            resolver.insert(service_id, Arc::new(provider));
        }
        context.mark_ready();
        let registry = ProviderRegistry::new(context.clone(), resolver, settings);
        (context, registry)
    }

    #[test]
    fn test_not_ready_context_is_retryable() {
        let context = Arc::new(BootstrapContext::new());
        let resolver = Arc::new(StaticResolver::new());
        context.register_search_provider("App\\Search\\files", "files");
        resolver.insert("App\\Search\\files", Arc::new(StubProvider::new("files")));

        let registry = ProviderRegistry::new(context.clone(), resolver, Settings::default());

        registry.ensure_loaded();
        assert!(!registry.is_loaded());
        assert!(registry.is_empty());
        assert!(registry.get("files").is_none());

        context.mark_ready();
        registry.ensure_loaded();
        assert!(registry.is_loaded());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("files"));
    }

    #[test]
    fn test_load_runs_once() {
        let (context, registry) = registry_with(vec![StubProvider::new("files")], Settings::default());
        registry.ensure_loaded();
        assert_eq!(registry.len(), 1);

        // Registrations added after the one-shot load are not picked up
        context.register_search_provider("App\\Search\\late", "late");
        registry.ensure_loaded();
        assert_eq!(registry.len(), 1);
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_resolution_failure_is_isolated() {
        init_tracing();
        let context = Arc::new(BootstrapContext::new());
        let resolver = Arc::new(StaticResolver::new());
        context.register_search_provider("App\\Search\\broken", "broken_app");
        context.register_search_provider("App\\Search\\files", "files");
        resolver.insert("App\\Search\\files", Arc::new(StubProvider::new("files")));
        context.mark_ready();

        let registry = ProviderRegistry::new(context, resolver, Settings::default());
        registry.ensure_loaded();

        assert!(registry.is_loaded());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("files"));
        assert!(!registry.contains("broken"));
    }

    #[test]
    fn test_last_registration_wins() {
        let context = Arc::new(BootstrapContext::new());
        let resolver = Arc::new(StaticResolver::new());
        context.register_search_provider("App\\Search\\first", "app1");
        context.register_search_provider("App\\Search\\second", "app2");
        resolver.insert(
            "App\\Search\\first",
            Arc::new(StubProvider::new("files").with_filters(&[("term", FilterKind::String)])),
        );
        resolver.insert(
            "App\\Search\\second",
            Arc::new(
                StubProvider::new("files")
                    .with_filters(&[("term", FilterKind::String), ("shared", FilterKind::Bool)]),
            ),
        );
        context.mark_ready();

        let registry = ProviderRegistry::new(context, resolver, Settings::default());
        registry.ensure_loaded();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.filter_kind("shared", "files"),
            Some(FilterKind::Bool)
        );
    }

    #[test]
    fn test_alias_routing() {
        let (_, registry) = registry_with(
            vec![
                StubProvider::new("files"),
                StubProvider::new("fulltext").with_alternates(&["files"]),
            ],
            Settings::default(),
        );
        registry.ensure_loaded();

        assert_eq!(registry.handlers("files"), vec!["files", "fulltext"]);
        assert_eq!(registry.handlers("fulltext"), vec!["fulltext"]);
        assert!(registry.handlers("unknown").is_empty());
    }

    #[test]
    fn test_filter_index() {
        let (_, registry) = registry_with(
            vec![
                StubProvider::new("files"),
                StubProvider::new("contacts")
                    .with_filters(&[("term", FilterKind::String), ("group", FilterKind::String)]),
            ],
            Settings::default(),
        );
        registry.ensure_loaded();

        assert!(registry.knows_filter("term"));
        assert!(registry.knows_filter("group"));
        assert!(!registry.knows_filter("modified"));
        assert_eq!(registry.filter_kind("term", "files"), Some(FilterKind::String));
        assert_eq!(registry.filter_kind("group", "files"), None);
        assert_eq!(
            registry.filter_kind("group", "contacts"),
            Some(FilterKind::String)
        );
    }

    #[test]
    fn test_disabled_provider_is_skipped() {
        let settings = Settings {
            disabled_providers: vec!["contacts".to_string()],
            ..Settings::default()
        };
        let (_, registry) = registry_with(
            vec![StubProvider::new("files"), StubProvider::new("contacts")],
            settings,
        );
        registry.ensure_loaded();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("files"));
        assert!(!registry.contains("contacts"));
    }

    #[test]
    fn test_settings_accessor_seeds_query_limit() {
        let settings = Settings {
            default_limit: 20,
            ..Settings::default()
        };
        let (_, registry) = registry_with(vec![StubProvider::new("files")], settings);

        let query =
            SearchQuery::simple("x").with_limit(registry.settings().default_limit);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_discovery_order_is_preserved() {
        let (_, registry) = registry_with(
            vec![
                StubProvider::new("settings"),
                StubProvider::new("files"),
                StubProvider::new("contacts"),
            ],
            Settings::default(),
        );
        registry.ensure_loaded();

        let ids: Vec<String> = registry
            .providers()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["settings", "files", "contacts"]);
    }
}
