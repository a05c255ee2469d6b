//! Database module for cached movie metadata.
//!
//! Uses SQLx with SQLite for lightweight, embedded storage. [`MovieStore`]
//! provides the engine's cache reads and the insert-or-update write.
//!
//! Identifier matching is case-insensitive (`UPPER(..) = UPPER(?)`) except
//! for the direct ID lookup, which is exact.
//!
//! # Example
//!
//! ```ignore
//! use reelmeta::db::{init_db, MovieStore};
//!
//! let pool = init_db("sqlite:reelmeta.db").await?;
//! let store = MovieStore::new(pool);
//! let hits = store.find_by_id_or_number("abc-123").await?;
//! ```

use chrono::Utc;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::Result;
use crate::model::MovieInfo;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "reelmeta.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// ============================================================================
// Database Row Types
// ============================================================================

/// Database row for the movie_info table.
#[derive(Debug, sqlx::FromRow)]
struct MovieInfoRow {
    provider: String,
    id: String,
    number: String,
    homepage: String,
    title: String,
    summary: String,
    director: String,
    actors: String,
    thumb_url: String,
    cover_url: String,
    preview_video_url: String,
    preview_images: String,
    maker: String,
    label: String,
    series: String,
    genres: String,
    runtime: i64,
    score: f64,
    release_date: String,
}

/// Decode a JSON list column, tolerating rows written by hand.
fn decode_list(column: &str, raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::debug!(column, error = %e, "ignoring malformed list column");
        Vec::new()
    })
}

fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

impl From<MovieInfoRow> for MovieInfo {
    fn from(row: MovieInfoRow) -> Self {
        MovieInfo {
            actors: decode_list("actors", &row.actors),
            preview_images: decode_list("preview_images", &row.preview_images),
            genres: decode_list("genres", &row.genres),
            id: row.id,
            number: row.number,
            provider: row.provider,
            homepage: row.homepage,
            title: row.title,
            summary: row.summary,
            director: row.director,
            thumb_url: row.thumb_url,
            cover_url: row.cover_url,
            preview_video_url: row.preview_video_url,
            maker: row.maker,
            label: row.label,
            series: row.series,
            runtime: row.runtime,
            score: row.score,
            release_date: row.release_date,
        }
    }
}

// ============================================================================
// Movie Store
// ============================================================================

/// Cache of validated movie records.
///
/// Cloning is cheap: the underlying pool is reference counted. SQLite
/// serialises writers, so concurrent upserts of the same key are safe and
/// resolve last-writer-wins.
#[derive(Debug, Clone)]
pub struct MovieStore {
    pool: SqlitePool,
}

impl MovieStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating and migrating if needed) the store at `db_url`.
    pub async fn open(db_url: &str) -> Result<Self> {
        Ok(Self::new(init_db(db_url).await?))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All records whose number or ID equals `keyword`, case-insensitively,
    /// across every provider. Rows come back in insertion order.
    pub async fn find_by_id_or_number(&self, keyword: &str) -> sqlx::Result<Vec<MovieInfo>> {
        let rows: Vec<MovieInfoRow> = sqlx::query_as(
            r#"
            SELECT * FROM movie_info
            WHERE UPPER(number) = UPPER(?) OR UPPER(id) = UPPER(?)
            ORDER BY rowid
            "#,
        )
        .bind(keyword)
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// First record from `provider` whose number or ID equals `keyword`,
    /// case-insensitively.
    pub async fn find_by_provider_and_keyword(
        &self,
        provider: &str,
        keyword: &str,
    ) -> sqlx::Result<Option<MovieInfo>> {
        let row: Option<MovieInfoRow> = sqlx::query_as(
            r#"
            SELECT * FROM movie_info
            WHERE provider = ?
              AND (UPPER(number) = UPPER(?) OR UPPER(id) = UPPER(?))
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(provider)
        .bind(keyword)
        .bind(keyword)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record from `provider` with exactly this normalized ID.
    pub async fn find_by_provider_and_id(
        &self,
        provider: &str,
        id: &str,
    ) -> sqlx::Result<Option<MovieInfo>> {
        let row: Option<MovieInfoRow> =
            sqlx::query_as("SELECT * FROM movie_info WHERE provider = ? AND id = ?")
                .bind(provider)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    /// Insert or update a movie record.
    ///
    /// Uses SQLite's UPSERT keyed on `(provider, id)`: an existing record has
    /// every field overwritten.
    pub async fn upsert(&self, info: &MovieInfo) -> sqlx::Result<()> {
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO movie_info (
                provider, id, number, homepage, title, summary, director, actors,
                thumb_url, cover_url, preview_video_url, preview_images,
                maker, label, series, genres, runtime, score, release_date, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(provider, id) DO UPDATE SET
                number = excluded.number,
                homepage = excluded.homepage,
                title = excluded.title,
                summary = excluded.summary,
                director = excluded.director,
                actors = excluded.actors,
                thumb_url = excluded.thumb_url,
                cover_url = excluded.cover_url,
                preview_video_url = excluded.preview_video_url,
                preview_images = excluded.preview_images,
                maker = excluded.maker,
                label = excluded.label,
                series = excluded.series,
                genres = excluded.genres,
                runtime = excluded.runtime,
                score = excluded.score,
                release_date = excluded.release_date,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&info.provider)
        .bind(&info.id)
        .bind(&info.number)
        .bind(&info.homepage)
        .bind(&info.title)
        .bind(&info.summary)
        .bind(&info.director)
        .bind(encode_list(&info.actors))
        .bind(&info.thumb_url)
        .bind(&info.cover_url)
        .bind(&info.preview_video_url)
        .bind(encode_list(&info.preview_images))
        .bind(&info.maker)
        .bind(&info.label)
        .bind(&info.series)
        .bind(encode_list(&info.genres))
        .bind(info.runtime)
        .bind(info.score)
        .bind(&info.release_date)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of cached records.
    pub async fn count(&self) -> sqlx::Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movie_info")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Cached records, optionally restricted to one provider, ordered by
    /// provider then number.
    pub async fn list(&self, provider: Option<&str>) -> sqlx::Result<Vec<MovieInfo>> {
        let rows: Vec<MovieInfoRow> = match provider {
            Some(provider) => {
                sqlx::query_as(
                    "SELECT * FROM movie_info WHERE provider = ? ORDER BY provider, number",
                )
                .bind(provider)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM movie_info ORDER BY provider, number")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
