//! Lookup engine - resolves movie metadata across providers and the cache.
//!
//! This is the high-level API for finding movie information:
//! 1. Optionally consult the cache first ("lazy" lookups)
//! 2. Query one provider, or fan out to every registered provider
//! 3. Validate, rank, and return the results
//! 4. Write fully fetched records back to the cache
//!
//! Cache failures never reach the caller: a failed read is a miss and a
//! failed write is logged and dropped.

use std::sync::Arc;

use crate::config::Config;
use crate::db::{self, MovieStore};
use crate::error::{Error, Result, ResultExt};
use crate::model::{MovieInfo, MovieSearchResult};
use crate::number;
use crate::priority::PrioritySlice;
use crate::provider::catalog::CatalogProvider;
use crate::provider::{MovieProvider, ProviderRegistry};

/// Resolves movie lookups against a provider registry and a cache store.
#[derive(Debug, Clone)]
pub struct Engine {
    providers: ProviderRegistry,
    store: MovieStore,
}

impl Engine {
    /// Create an engine over an already wired registry and store.
    pub fn new(providers: ProviderRegistry, store: MovieStore) -> Self {
        Self { providers, store }
    }

    /// Build an engine from configuration: opens the cache database and
    /// registers every configured catalogue.
    ///
    /// `db_override` takes precedence over the configured database path.
    pub async fn from_config(
        config: &Config,
        db_override: Option<&std::path::Path>,
    ) -> Result<Self> {
        let db_path = db_override.or(config.database.path.as_deref());
        let store = MovieStore::open(&db::db_url(db_path))
            .await
            .with_context("opening cache database")?;

        let mut providers = ProviderRegistry::new();
        for catalog in &config.catalogs {
            let provider =
                CatalogProvider::from_file(&catalog.name, catalog.priority, &catalog.path)
                    .map_err(|e| Error::config(format!("catalog '{}': {}", catalog.name, e)))?;
            tracing::info!(provider = %catalog.name, records = provider.len(), "loaded catalog");
            providers.register(Arc::new(provider));
        }

        Ok(Self::new(providers, store))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    fn provider(&self, name: &str) -> Result<&Arc<dyn MovieProvider>> {
        self.providers
            .lookup(name)
            .ok_or_else(|| Error::provider_not_found(name))
    }

    /// Search one provider by keyword.
    ///
    /// With `lazy`, a single cached record whose number or ID matches the
    /// keyword is returned without calling the provider. Providers that
    /// cannot search are queried by ID instead, treating the keyword as one.
    pub async fn search_movie(
        &self,
        keyword: &str,
        name: &str,
        lazy: bool,
    ) -> Result<Vec<MovieSearchResult>> {
        let keyword = number::trim(keyword);
        if keyword.is_empty() {
            return Err(Error::InvalidKeyword);
        }
        let provider = self.provider(name)?;
        self.search_with(&keyword, provider.as_ref(), lazy).await
    }

    /// Search every registered provider and rank the merged results.
    ///
    /// With `lazy`, cached records matching the keyword by number or ID are
    /// returned as-is, in storage order, and no provider is called.
    ///
    /// Otherwise all providers are queried concurrently. A failing provider
    /// contributes nothing; the others still count. Valid results are ranked
    /// by `similarity(keyword, number) * provider priority`, ties keeping
    /// arrival order.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no valid result remains.
    pub async fn search_movie_all(
        &self,
        keyword: &str,
        lazy: bool,
    ) -> Result<Vec<MovieSearchResult>> {
        let keyword = number::trim(keyword);
        if keyword.is_empty() {
            return Err(Error::InvalidKeyword);
        }

        if lazy {
            let cached = self.cached_matches(&keyword).await;
            if !cached.is_empty() {
                tracing::debug!(%keyword, count = cached.len(), "serving search from cache");
                return Ok(cached);
            }
        }

        let results = self.fan_out(&keyword).await;

        let mut ps = PrioritySlice::with_capacity(results.len());
        for (priority, result) in results {
            if !result.is_valid() {
                tracing::debug!(
                    provider = %result.provider,
                    id = %result.id,
                    "dropping invalid result"
                );
                continue;
            }
            ps.append(number::similarity(&keyword, &result.number) * priority, result);
        }

        let ranked = ps.sort().into_underlying();
        if ranked.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(ranked)
    }

    /// Fetch the full record for `id` from one provider.
    ///
    /// With `lazy`, a cached record is returned without calling the provider.
    /// A freshly fetched valid record is written back to the cache before
    /// returning.
    pub async fn get_movie_info_by_id(
        &self,
        id: &str,
        name: &str,
        lazy: bool,
    ) -> Result<MovieInfo> {
        let provider = self.provider(name)?;
        self.fetch_with(id, provider.as_ref(), lazy).await
    }

    async fn search_with(
        &self,
        keyword: &str,
        provider: &dyn MovieProvider,
        lazy: bool,
    ) -> Result<Vec<MovieSearchResult>> {
        let Some(searcher) = provider.searcher() else {
            let info = self.fetch_with(keyword, provider, true).await?;
            return Ok(vec![info.to_search_result()]);
        };

        if lazy {
            match self
                .store
                .find_by_provider_and_keyword(provider.name(), keyword)
                .await
            {
                Ok(Some(info)) if info.is_valid() => {
                    tracing::debug!(provider = provider.name(), %keyword, "cache hit");
                    return Ok(vec![info.to_search_result()]);
                }
                Ok(_) => tracing::debug!(provider = provider.name(), %keyword, "cache miss"),
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "cache read failed")
                }
            }
        }

        Ok(searcher.search_movie(keyword).await?)
    }

    async fn fetch_with(
        &self,
        raw_id: &str,
        provider: &dyn MovieProvider,
        lazy: bool,
    ) -> Result<MovieInfo> {
        let id = provider.normalize_id(raw_id);
        if id.is_empty() {
            return Err(Error::InvalidId);
        }

        if lazy {
            match self.store.find_by_provider_and_id(provider.name(), &id).await {
                Ok(Some(info)) if info.is_valid() => {
                    tracing::debug!(provider = provider.name(), %id, "cache hit");
                    return Ok(info);
                }
                Ok(_) => tracing::debug!(provider = provider.name(), %id, "cache miss"),
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "cache read failed")
                }
            }
        }

        let mut info = provider.get_movie_info_by_id(&id).await?;
        if info.provider.is_empty() {
            info.provider = provider.name().to_string();
        }
        if !info.is_valid() {
            tracing::warn!(provider = provider.name(), %id, "provider returned an invalid record");
            return Err(Error::NotFound);
        }

        if let Err(e) = self.store.upsert(&info).await {
            tracing::warn!(provider = provider.name(), %id, error = %e, "cache write failed");
        }
        Ok(info)
    }

    /// Valid cached records matching `keyword` by number or ID, any provider.
    async fn cached_matches(&self, keyword: &str) -> Vec<MovieSearchResult> {
        match self.store.find_by_id_or_number(keyword).await {
            Ok(rows) => rows
                .iter()
                .filter(|info| info.is_valid())
                .map(MovieInfo::to_search_result)
                .collect(),
            Err(e) => {
                tracing::warn!(%keyword, error = %e, "cache read failed");
                Vec::new()
            }
        }
    }

    /// Query every provider concurrently, pairing each result with the
    /// priority of the provider that produced it.
    async fn fan_out(&self, keyword: &str) -> Vec<(f64, MovieSearchResult)> {
        let searches = self.providers.all().map(|provider| async move {
            let outcome = self.search_with(keyword, provider.as_ref(), false).await;
            (provider, outcome)
        });

        let outcomes = futures::future::join_all(searches).await;

        let mut results = Vec::new();
        for (provider, outcome) in outcomes {
            match outcome {
                Ok(found) => {
                    tracing::debug!(
                        provider = provider.name(),
                        count = found.len(),
                        "provider returned results"
                    );
                    let priority = provider.priority();
                    results.extend(found.into_iter().map(|r| (priority, r)));
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider search failed"
                    );
                }
            }
        }
        results
    }
}
