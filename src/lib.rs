//! reelmeta - movie metadata resolution engine.
//!
//! Answers "find information about movie X" by consulting a set of
//! pluggable providers, ranking their answers, and caching validated
//! records in SQLite so later lookups can skip the providers entirely.
//!
//! # Modules
//!
//! - [`engine`]: The lookup orchestrator (single-provider search, fan-out
//!   search, fetch-by-ID, cache-first and write-back policy)
//! - [`provider`]: Provider traits, the registry, and a JSON catalogue provider
//! - [`db`]: SQLite cache store
//! - [`number`]: Keyword trimming and similarity scoring
//! - [`priority`]: Weight-ordered result set used for ranking
//!
//! # Example
//!
//! ```ignore
//! use reelmeta::{Engine, config};
//!
//! let engine = Engine::from_config(&config::load(), None).await?;
//! for result in engine.search_movie_all("abc-123", true).await? {
//!     println!("[{}] {} {}", result.provider, result.number, result.title);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod model;
pub mod number;
pub mod priority;
pub mod provider;
#[cfg(test)]
pub mod test_utils;

pub use engine::Engine;
pub use error::{Error, Result};
pub use model::{MovieInfo, MovieSearchResult};
pub use provider::{MovieProvider, MovieSearcher, ProviderError, ProviderRegistry};
