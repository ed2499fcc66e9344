//! Provider registry mapping provider names to adapter factories.
//!
//! The registry is an ordinary value built once at startup and shared by
//! reference. Registration needs `&mut self`, so once the registry is behind
//! an `Arc` or a shared borrow it can no longer change.

use std::collections::BTreeMap;
use std::sync::Arc;

use transcoding_common::{Error, Result};

use super::contract::Provider;
use super::providers::{elastictranscoder, mediaconvert};
use crate::config::Config;

/// Builds an adapter from configuration.
///
/// Must fail with [`Error::InvalidConfig`] instead of returning an adapter
/// that is missing required settings.
pub type ProviderFactory = fn(&Config) -> Result<Arc<dyn Provider>>;

/// A name-keyed table of provider factories.
///
/// # Examples
///
/// ```rust
/// use transcoding_api::config::Config;
/// use transcoding_api::provider::ProviderRegistry;
///
/// let registry = ProviderRegistry::with_defaults();
/// assert!(registry.contains("elastictranscoder"));
///
/// // Missing credentials are rejected up front.
/// assert!(registry.build("elastictranscoder", &Config::default()).is_err());
/// ```
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<&'static str, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in adapter.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(elastictranscoder::NAME, elastictranscoder::factory);
        registry.register(mediaconvert::NAME, mediaconvert::factory);
        registry
    }

    /// Associate `name` with `factory`, returning any factory it replaces.
    pub fn register(&mut self, name: &'static str, factory: ProviderFactory) -> Option<ProviderFactory> {
        let previous = self.factories.insert(name, factory);
        if previous.is_some() {
            tracing::warn!(provider = name, "Replacing previously registered provider factory");
        }
        previous
    }

    /// Look up the factory registered under `name`.
    pub fn factory(&self, name: &str) -> Result<ProviderFactory> {
        self.factories
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_provider(name))
    }

    /// Resolve `name` and build the adapter from `config`.
    pub fn build(&self, name: &str, config: &Config) -> Result<Arc<dyn Provider>> {
        let factory = self.factory(name)?;
        factory(config)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
