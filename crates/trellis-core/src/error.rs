//! Error types for trellis-core

use crate::page::PageId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for trellis-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trellis-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without path context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Parsing error (page tables, config files)
    #[error("Parse error: {message}")]
    Parse {
        /// What failed to parse
        message: String,
    },

    /// The page tree itself is inconsistent
    #[error("Repository error: {message}")]
    Repository {
        /// What went wrong
        message: String,
    },

    /// A front-end URL could not be generated for a page
    #[error("Unable to generate URL for page ID {page_id}: {message}")]
    Routing {
        /// Page the URL was requested for
        page_id: PageId,
        /// Why routing failed
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a new repository error.
    pub fn repository<S: Into<String>>(message: S) -> Self {
        Error::Repository {
            message: message.into(),
        }
    }

    /// Creates a new routing error for a page.
    pub fn routing<S: Into<String>>(page_id: PageId, message: S) -> Self {
        Error::Routing {
            page_id,
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
