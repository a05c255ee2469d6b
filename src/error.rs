//! Engine-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level engine error enum, the only error lookups surface
//! - [`ProviderError`]: Failures reported by a provider, passed through verbatim
//!   on single-provider paths
//!
//! Cache read and write failures never appear here: the engine logs them and
//! falls back to the provider path.
//!
//! # Example
//!
//! ```ignore
//! use reelmeta::error::{Error, Result};
//!
//! match engine.search_movie("  ", "local", true).await {
//!     Err(Error::InvalidKeyword) => eprintln!("empty keyword"),
//!     other => println!("{:?}", other),
//! }
//! ```

pub use crate::provider::ProviderError;

/// Engine-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Keyword was empty after trimming
    #[error("invalid keyword")]
    InvalidKeyword,

    /// Provider did not recognise the ID
    #[error("invalid id")]
    InvalidId,

    /// No provider is registered under the requested name
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// The lookup completed but produced no valid result
    #[error("not found")]
    NotFound,

    /// A provider failed and was the only source for the lookup
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Database setup error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error during database setup
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a provider-not-found error.
    pub fn provider_not_found(name: impl Into<String>) -> Self {
        Self::ProviderNotFound(name.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error means "nothing matched" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound | Self::Provider(ProviderError::NotFound) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}
