//! Movie number helpers: keyword trimming and similarity scoring.
//!
//! A "number" is the human-facing catalogue code of a movie (e.g. `ABC-123`).
//! Providers format numbers inconsistently (`abc123`, `ABC_123`, `ABC-123`),
//! so comparisons always go through [`normalize`] first.

/// Video file extensions stripped from keywords, so a file name can be
/// passed straight in as a search keyword.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "wmv", "mov", "flv", "ts", "m4v", "rmvb", "webm",
];

/// Trim a raw user keyword.
///
/// Removes surrounding whitespace and a single trailing video extension.
/// Returns an empty string when nothing meaningful is left.
pub fn trim(keyword: &str) -> String {
    let keyword = keyword.trim();
    let stripped = match keyword.rsplit_once('.') {
        Some((stem, ext))
            if VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => keyword,
    };
    stripped.trim().to_string()
}

/// Normalize a number for comparison: uppercase, alphanumerics only.
pub fn normalize(number: &str) -> String {
    number
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Similarity between a keyword and a candidate number, in `[0.0, 1.0]`.
///
/// Case and separators are ignored, so `abc123` and `ABC-123` score `1.0`.
pub fn similarity(keyword: &str, number: &str) -> f64 {
    strsim::normalized_levenshtein(&normalize(keyword), &normalize(number))
}
