//! Test utilities and fixtures for reelmeta tests.
//!
//! This module provides common test helpers, mock providers, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use reelmeta::test_utils::{temp_store, MockProvider};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (store, _dir) = temp_store().await;
//!     let provider = MockProvider::fetch_only("A", 1.0);
//!     // ... test logic
//! }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::db::MovieStore;
use crate::model::{MovieInfo, MovieSearchResult};
use crate::provider::{MovieProvider, MovieSearcher, ProviderError};

/// Creates a temporary movie store for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_store() -> (MovieStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let store = MovieStore::open(&db_url)
        .await
        .expect("Failed to initialize test database");

    (store, dir)
}

/// Creates a valid MovieInfo with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = MovieInfo {
///     title: "Custom Title".to_string(),
///     ..mock_movie_info("A", "xyz1", "XYZ-001")
/// };
/// ```
pub fn mock_movie_info(provider: &str, id: &str, number: &str) -> MovieInfo {
    MovieInfo {
        id: id.to_string(),
        number: number.to_string(),
        provider: provider.to_string(),
        homepage: format!("https://{}.example.com/{}", provider.to_lowercase(), id),
        title: format!("Movie {}", number),
        cover_url: format!("https://{}.example.com/{}/cover.jpg", provider.to_lowercase(), id),
        release_date: "2020-01-01".to_string(),
        ..Default::default()
    }
}

/// Creates a valid MovieSearchResult.
pub fn mock_search_result(provider: &str, id: &str, number: &str) -> MovieSearchResult {
    mock_movie_info(provider, id, number).to_search_result()
}

/// Mock provider that returns predefined results and counts its calls.
pub struct MockProvider {
    name: String,
    priority: f64,
    /// Results for keyword search; `None` disables the search capability
    search_results: Option<Vec<MovieSearchResult>>,
    /// Error returned by every call (takes precedence over results)
    pub error: Option<ProviderError>,
    /// Records served by ID
    pub infos: HashMap<String, MovieInfo>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockProvider {
    /// A provider that can only fetch by ID, with no records.
    pub fn fetch_only(name: &str, priority: f64) -> Self {
        Self {
            name: name.to_string(),
            priority,
            search_results: None,
            error: None,
            infos: HashMap::new(),
            search_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// A provider that also searches, always returning `results`.
    pub fn searching(name: &str, priority: f64, results: Vec<MovieSearchResult>) -> Self {
        Self {
            search_results: Some(results),
            ..Self::fetch_only(name, priority)
        }
    }

    /// A searching provider whose every call fails with `error`.
    pub fn failing(name: &str, priority: f64, error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Self::searching(name, priority, vec![])
        }
    }

    /// Serve `info` when fetched by its ID.
    pub fn with_info(mut self, info: MovieInfo) -> Self {
        self.infos.insert(info.id.clone(), info);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieSearcher for MockProvider {
    async fn search_movie(&self, _keyword: &str) -> Result<Vec<MovieSearchResult>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref err) = self.error {
            return Err(err.clone());
        }
        Ok(self.search_results.clone().unwrap_or_default())
    }
}

#[async_trait]
impl MovieProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    /// Trims, and rejects anything containing `!`.
    fn normalize_id(&self, raw: &str) -> String {
        let id = raw.trim();
        if id.contains('!') {
            return String::new();
        }
        id.to_string()
    }

    async fn get_movie_info_by_id(&self, id: &str) -> Result<MovieInfo, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref err) = self.error {
            return Err(err.clone());
        }
        self.infos.get(id).cloned().ok_or(ProviderError::NotFound)
    }

    fn searcher(&self) -> Option<&dyn MovieSearcher> {
        if self.search_results.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_store_works() {
        let (store, dir) = temp_store().await;
        assert!(dir.path().join("test.db").exists());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[test]
    fn test_mock_movie_info_is_valid() {
        let info = mock_movie_info("A", "xyz1", "XYZ-001");
        assert!(info.is_valid());
        assert!(mock_search_result("A", "xyz1", "XYZ-001").is_valid());
    }

    #[tokio::test]
    async fn test_mock_provider_counts_calls() {
        let provider = MockProvider::searching("A", 1.0, vec![])
            .with_info(mock_movie_info("A", "xyz1", "XYZ-001"));

        provider.search_movie("anything").await.unwrap();
        provider.get_movie_info_by_id("xyz1").await.unwrap();
        let missing = provider.get_movie_info_by_id("other").await;

        assert_eq!(missing, Err(ProviderError::NotFound));
        assert_eq!(provider.search_calls(), 1);
        assert_eq!(provider.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = MockProvider::failing("A", 1.0, ProviderError::Network("down".into()));
        assert!(provider.searcher().is_some());
        let result = provider.search_movie("x").await;
        assert!(matches!(result, Err(ProviderError::Network(_))));
    }
}
