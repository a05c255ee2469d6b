//! Local catalogue provider.
//!
//! Serves movie records from a JSON file on disk (an array of [`MovieInfo`]
//! objects). Useful for offline lookups, curated overrides, and testing the
//! engine against realistic data without touching the network.

use std::path::Path;

use async_trait::async_trait;

use super::{MovieProvider, MovieSearcher, ProviderError};
use crate::model::{MovieInfo, MovieSearchResult};
use crate::number;

/// A provider backed by an in-memory list of records.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    name: String,
    priority: f64,
    records: Vec<MovieInfo>,
}

impl CatalogProvider {
    /// Create a catalogue from records already in memory.
    ///
    /// Every record's `provider` field is overwritten with `name`.
    pub fn new(name: impl Into<String>, priority: f64, records: Vec<MovieInfo>) -> Self {
        let name = name.into();
        let records = records
            .into_iter()
            .map(|info| MovieInfo {
                provider: name.clone(),
                ..info
            })
            .collect();
        Self {
            name,
            priority,
            records,
        }
    }

    /// Load a catalogue from a JSON file.
    pub fn from_file(
        name: impl Into<String>,
        priority: f64,
        path: &Path,
    ) -> Result<Self, ProviderError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Other(format!("{}: {}", path.display(), e)))?;
        Self::from_json(name, priority, &contents)
    }

    /// Parse a catalogue from a JSON array of records.
    pub fn from_json(
        name: impl Into<String>,
        priority: f64,
        json: &str,
    ) -> Result<Self, ProviderError> {
        let records: Vec<MovieInfo> =
            serde_json::from_str(json).map_err(|e| ProviderError::Parse(e.to_string()))?;
        Ok(Self::new(name, priority, records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(info: &MovieInfo, keyword: &str) -> bool {
        if info.number.eq_ignore_ascii_case(keyword) || info.id.eq_ignore_ascii_case(keyword) {
            return true;
        }
        let wanted = number::normalize(keyword);
        if !wanted.is_empty() && number::normalize(&info.number).contains(&wanted) {
            return true;
        }
        info.title.to_lowercase().contains(&keyword.to_lowercase())
    }
}

#[async_trait]
impl MovieSearcher for CatalogProvider {
    async fn search_movie(&self, keyword: &str) -> Result<Vec<MovieSearchResult>, ProviderError> {
        let results: Vec<MovieSearchResult> = self
            .records
            .iter()
            .filter(|info| Self::matches(info, keyword))
            .map(MovieInfo::to_search_result)
            .collect();
        tracing::trace!(provider = %self.name, keyword, count = results.len(), "catalog search");
        Ok(results)
    }
}

#[async_trait]
impl MovieProvider for CatalogProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn normalize_id(&self, raw: &str) -> String {
        let id = raw.trim();
        if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return String::new();
        }
        id.to_string()
    }

    async fn get_movie_info_by_id(&self, id: &str) -> Result<MovieInfo, ProviderError> {
        self.records
            .iter()
            .find(|info| info.id == id)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }

    fn searcher(&self) -> Option<&dyn MovieSearcher> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "abc00123", "number": "ABC-123", "title": "First Light", "provider": "elsewhere"},
        {"id": "abc00124", "number": "ABC-124", "title": "Second Wind"},
        {"id": "xyz1", "number": "XYZ-001", "title": "Night Shift", "score": 4.2}
    ]"#;

    fn catalog() -> CatalogProvider {
        CatalogProvider::from_json("local", 1.5, CATALOG).unwrap()
    }

    #[test]
    fn test_from_json_sets_provider_name() {
        let provider = catalog();
        assert_eq!(provider.len(), 3);
        assert!(provider.records.iter().all(|r| r.provider == "local"));
        assert_eq!(provider.name(), "local");
        assert_eq!(provider.priority(), 1.5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = CatalogProvider::from_json("local", 1.0, "{not json").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let provider = CatalogProvider::from_file("disk", 1.0, &path).unwrap();
        assert_eq!(provider.len(), 3);

        let missing = CatalogProvider::from_file("disk", 1.0, &dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ProviderError::Other(_))));
    }

    #[test]
    fn test_normalize_id() {
        let provider = catalog();
        assert_eq!(provider.normalize_id("  xyz1 "), "xyz1");
        assert_eq!(provider.normalize_id("xy z1"), "");
        assert_eq!(provider.normalize_id("   "), "");
    }

    #[tokio::test]
    async fn test_search_by_number_variants() {
        let provider = catalog();
        let results = provider.search_movie("abc123").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number, "ABC-123");

        let prefix = provider.search_movie("abc").await.unwrap();
        assert_eq!(prefix.len(), 2);
    }

    #[tokio::test]
    async fn test_search_by_title() {
        let provider = catalog();
        let results = provider.search_movie("night").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "xyz1");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let provider = catalog();
        let info = provider.get_movie_info_by_id("xyz1").await.unwrap();
        assert_eq!(info.number, "XYZ-001");
        assert_eq!(info.provider, "local");

        let missing = provider.get_movie_info_by_id("nope").await;
        assert_eq!(missing, Err(ProviderError::NotFound));
    }
}
