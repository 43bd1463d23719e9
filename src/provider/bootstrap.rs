//! In-memory discovery collaborators
//!
//! Embedders that do not bring their own bootstrap machinery can declare
//! providers programmatically: registrations go into a [`BootstrapContext`]
//! while the service instances live in a [`StaticResolver`]. The context
//! reports nothing until bootstrap is marked finished, so a registry
//! created early stays unloaded and retries later.

use super::traits::{ProviderRegistration, RegistrationContext, SearchProvider, ServiceResolver};
use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Registration context populated during application bootstrap
#[derive(Default)]
pub struct BootstrapContext {
    state: RwLock<BootstrapState>,
}

#[derive(Default)]
struct BootstrapState {
    registrations: Vec<ProviderRegistration>,
    ready: bool,
}

impl BootstrapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a search provider for an app
    pub fn register_search_provider(
        &self,
        service_id: impl Into<String>,
        app_id: impl Into<String>,
    ) {
        let registration = ProviderRegistration::new(service_id, app_id);
        debug!(
            service = %registration.service_id,
            app = %registration.app_id,
            "registered search provider"
        );
        self.state.write().unwrap().registrations.push(registration);
    }

    /// Mark bootstrap as finished, making the registrations visible
    pub fn mark_ready(&self) {
        self.state.write().unwrap().ready = true;
    }
}

impl RegistrationContext for BootstrapContext {
    fn search_providers(&self) -> Option<Vec<ProviderRegistration>> {
        let state = self.state.read().unwrap();
        state.ready.then(|| state.registrations.clone())
    }
}

/// Service resolver backed by a static service map
#[derive(Default)]
pub struct StaticResolver {
    services: RwLock<HashMap<String, Arc<dyn SearchProvider>>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider instance under a service identifier
    pub fn insert(&self, service_id: impl Into<String>, provider: Arc<dyn SearchProvider>) {
        self.services
            .write()
            .unwrap()
            .insert(service_id.into(), provider);
    }
}

impl ServiceResolver for StaticResolver {
    fn resolve(&self, service_id: &str) -> anyhow::Result<Arc<dyn SearchProvider>> {
        self.services
            .read()
            .unwrap()
            .get(service_id)
            .cloned()
            .ok_or_else(|| anyhow!("service {service_id} is not registered"))
    }
}
