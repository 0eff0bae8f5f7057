//! Request-level error kinds.
//!
//! Every failure a handler can hit maps to one of these variants; the
//! HTTP status each one produces lives in `http::response`.

use thiserror::Error;

/// Errors that can end a wiki request.
#[derive(Debug, Error)]
pub enum WikiError {
    /// The page could not be read, or the path did not match a route.
    /// The cause is deliberately not kept.
    #[error("page not found: {0}")]
    NotFound(String),

    /// Persisting a page failed.
    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// Merging a page into a template failed.
    #[error(transparent)]
    Render(#[from] minijinja::Error),
}
