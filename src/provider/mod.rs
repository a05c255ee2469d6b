//! Movie metadata providers.
//!
//! A provider wraps one external data source. The engine only sees it through
//! the [`MovieProvider`] trait, so site-specific fetching and parsing stay
//! inside each implementation.
//!
//! # Capabilities
//!
//! Every provider can fetch a full [`MovieInfo`] by ID. Providers that can
//! also search by free-text keyword expose a [`MovieSearcher`] through
//! [`MovieProvider::searcher`]; the engine branches on that instead of
//! inspecting concrete types.
//!
//! # Example
//!
//! ```ignore
//! use reelmeta::provider::{ProviderRegistry, catalog::CatalogProvider};
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register(Arc::new(CatalogProvider::from_file("local", 1.0, path)?));
//! let provider = registry.lookup("local").expect("registered");
//! ```

pub mod catalog;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{MovieInfo, MovieSearchResult};

/// Errors a provider can report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("movie not found")]
    NotFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Provider error: {0}")]
    Other(String),
}

/// Keyword search capability.
#[async_trait]
pub trait MovieSearcher: Send + Sync {
    /// Search for movies matching a free-text keyword.
    async fn search_movie(&self, keyword: &str) -> Result<Vec<MovieSearchResult>, ProviderError>;
}

/// A named movie metadata source.
///
/// Implementations must be `Send + Sync`: the engine queries every provider
/// concurrently during an all-provider search.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Stable, non-empty provider name.
    fn name(&self) -> &str;

    /// Ranking multiplier. Higher priority ranks equally similar results higher.
    fn priority(&self) -> f64;

    /// Normalize a raw ID into this provider's form.
    ///
    /// Returns an empty string when the ID is not valid for this provider.
    fn normalize_id(&self, raw: &str) -> String;

    /// Fetch the full record for an already-normalized ID.
    async fn get_movie_info_by_id(&self, id: &str) -> Result<MovieInfo, ProviderError>;

    /// Keyword search capability, if this provider has one.
    fn searcher(&self) -> Option<&dyn MovieSearcher> {
        None
    }
}

/// Providers keyed by name.
///
/// Filled once while wiring the engine, read-only afterwards.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn MovieProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own name.
    ///
    /// A provider registered under a name already in use replaces the
    /// earlier one.
    pub fn register(&mut self, provider: Arc<dyn MovieProvider>) {
        let name = provider.name().to_string();
        if self.providers.insert(name.clone(), provider).is_some() {
            tracing::warn!(provider = %name, "replacing already registered provider");
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, provider: Arc<dyn MovieProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn MovieProvider>> {
        self.providers.get(name)
    }

    /// All providers, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn MovieProvider>> {
        self.providers.values()
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
