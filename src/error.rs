//! Error types.
//!
//! Command handlers and configuration code return the `anyhow` based [`Result`]. The document
//! operations return [`SalesError`] so that front ends can match on the kind of failure and show a
//! message to the user.

use std::path::PathBuf;
use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The failures that can come out of the document operations and the persistence store.
#[derive(Debug, Error)]
pub enum SalesError {
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Subcategory '{subcategory}' already exists in category '{category}'")]
    DuplicateSubcategory {
        category: String,
        subcategory: String,
    },

    #[error("A category must be selected")]
    MissingCategory,

    #[error("A category and a subcategory must be selected")]
    MissingSelection,

    #[error("A name is required")]
    EmptyName,

    #[error("Price must be a non-negative number, got '{0}'")]
    InvalidPrice(String),

    #[error("Amount must be a non-negative number, got '{0}'")]
    InvalidAmount(String),

    #[error("You must log in first")]
    NotAuthenticated,

    #[error("User '{0}' already exists")]
    UserExists(String),

    #[error("Sale #{0} not found")]
    NotFound(u64),

    #[error("Unable to access the data file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse the data file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SalesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Validation failures leave the document untouched and can be shown to the user as-is.
    /// Storage failures are fatal for the action that triggered them.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse { .. })
    }
}
