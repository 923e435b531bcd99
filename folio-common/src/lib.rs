//! Common types and utilities shared across Folio crates.
//!
//! This crate defines the shared error type and the observability helpers
//! used throughout the Folio workspace. It is intentionally lightweight so
//! that every crate can depend on it without pulling in the browser or HTTP
//! stacks.
//!
//! # Overview
//!
//! - [`FolioError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use folio_common::FolioError;
//!
//! let err = FolioError::NotFound {
//!     selector: "section".into(),
//!     url: "https://example.com/a".into(),
//! };
//! assert!(err.to_string().contains("section"));
//! assert!(!err.is_input_error());
//! ```
use std::path::PathBuf;

pub mod observability;

/// Error kinds raised while archiving articles.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// The browser could not load the article page.
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The designated content region was absent from the loaded page.
    #[error("content region `{selector}` not found on {url}")]
    NotFound { selector: String, url: String },

    /// An asset download failed.
    #[error("network error: {0}")]
    Network(String),

    /// Creating or writing part of the archive failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the links file is not a usable article URL.
    #[error("invalid link on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The extracted markup could not be rewritten.
    #[error("markup rewrite failed: {0}")]
    Markup(String),

    /// The WebDriver session reported an error outside navigation/lookup.
    #[error("browser error: {0}")]
    Browser(String),
}

impl FolioError {
    /// Wrap an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the input list rather than by the article.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Convenient alias for results that use [`FolioError`].
pub type Result<T> = std::result::Result<T, FolioError>;
