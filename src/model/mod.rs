//! Core data models for movie metadata.
//!
//! Defines the two records the engine passes around:
//! - [`MovieInfo`] - the full metadata record, keyed by `(provider, id)`
//! - [`MovieSearchResult`] - a lightweight projection used for listings
//!
//! # Identifiers
//!
//! Every record carries two identifiers:
//! - `id` - the provider-local, opaque identifier (what `get_movie_info_by_id` takes)
//! - `number` - the human-facing catalogue code (what users usually type)

use serde::{Deserialize, Serialize};

/// Full metadata for one movie from one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieInfo {
    /// Provider-local identifier
    pub id: String,
    /// Human-facing catalogue number (e.g. `ABC-123`)
    pub number: String,
    /// Name of the provider this record came from
    pub provider: String,
    /// Provider page for this movie
    pub homepage: String,
    pub title: String,
    pub summary: String,
    pub director: String,
    pub actors: Vec<String>,
    pub thumb_url: String,
    pub cover_url: String,
    pub preview_video_url: String,
    pub preview_images: Vec<String>,
    pub maker: String,
    pub label: String,
    pub series: String,
    pub genres: Vec<String>,
    /// Runtime in minutes (0 = unknown)
    pub runtime: i64,
    /// User rating (0.0 = unrated)
    pub score: f64,
    /// Release date as `YYYY-MM-DD` (empty = unknown)
    pub release_date: String,
}

/// Listing-level view of a movie, returned by searches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieSearchResult {
    pub id: String,
    pub number: String,
    pub provider: String,
    pub homepage: String,
    pub title: String,
    pub actors: Vec<String>,
    pub thumb_url: String,
    pub cover_url: String,
    pub score: f64,
    pub release_date: String,
}

/// An identifier is well-formed when it is non-empty after trimming and
/// carries no control characters.
fn is_well_formed(value: &str) -> bool {
    !value.trim().is_empty() && !value.chars().any(char::is_control)
}

impl MovieInfo {
    /// Whether this record may be cached or returned to callers.
    pub fn is_valid(&self) -> bool {
        !self.provider.trim().is_empty() && is_well_formed(&self.id) && is_well_formed(&self.number)
    }

    /// Project this record down to a search listing entry.
    pub fn to_search_result(&self) -> MovieSearchResult {
        MovieSearchResult {
            id: self.id.clone(),
            number: self.number.clone(),
            provider: self.provider.clone(),
            homepage: self.homepage.clone(),
            title: self.title.clone(),
            actors: self.actors.clone(),
            thumb_url: self.thumb_url.clone(),
            cover_url: self.cover_url.clone(),
            score: self.score,
            release_date: self.release_date.clone(),
        }
    }
}

impl From<MovieInfo> for MovieSearchResult {
    fn from(info: MovieInfo) -> Self {
        info.to_search_result()
    }
}

impl MovieSearchResult {
    /// Whether this result may be returned to callers.
    pub fn is_valid(&self) -> bool {
        !self.provider.trim().is_empty() && is_well_formed(&self.id) && is_well_formed(&self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieInfo {
        MovieInfo {
            id: "xyz1".to_string(),
            number: "XYZ-001".to_string(),
            provider: "A".to_string(),
            title: "Sample".to_string(),
            actors: vec!["Someone".to_string()],
            score: 4.5,
            release_date: "2021-03-04".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_info() {
        assert!(sample().is_valid());
    }

    #[test]
    fn test_info_requires_id_and_number() {
        let no_id = MovieInfo {
            id: String::new(),
            ..sample()
        };
        let no_number = MovieInfo {
            number: "   ".to_string(),
            ..sample()
        };
        let no_provider = MovieInfo {
            provider: String::new(),
            ..sample()
        };
        assert!(!no_id.is_valid());
        assert!(!no_number.is_valid());
        assert!(!no_provider.is_valid());
    }

    #[test]
    fn test_info_rejects_control_characters() {
        let info = MovieInfo {
            id: "xyz\n1".to_string(),
            ..sample()
        };
        assert!(!info.is_valid());
    }

    #[test]
    fn test_to_search_result_projects_fields() {
        let info = sample();
        let result = info.to_search_result();
        assert_eq!(result.id, "xyz1");
        assert_eq!(result.number, "XYZ-001");
        assert_eq!(result.provider, "A");
        assert_eq!(result.title, "Sample");
        assert_eq!(result.actors, vec!["Someone".to_string()]);
        assert_eq!(result.release_date, "2021-03-04");
        assert!(result.is_valid());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let info: MovieInfo =
            serde_json::from_str(r#"{"id":"a1","number":"A-1","provider":"local"}"#).unwrap();
        assert!(info.is_valid());
        assert!(info.actors.is_empty());
        assert_eq!(info.runtime, 0);
    }
}
