//! The JSON data file that holds the whole [`Document`].
//!
//! Every save rewrites the entire file. There is no locking: if two sessions write the same file
//! the last save wins.

use crate::error::SalesError;
use crate::model::{Document, DOCUMENT_KEYS};
use crate::utils;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads and writes the data file at a fixed path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty document if the data file does not exist yet. Returns `true` if the file
    /// was created. This belongs to environment setup; `load` never creates the file.
    pub fn init(&self) -> Result<bool, SalesError> {
        if self.path.is_file() {
            debug!("Data file {} already exists", self.path.display());
            return Ok(false);
        }
        self.save(&Document::new())?;
        Ok(true)
    }

    /// Reads the document. Top-level keys missing from the file are filled with empty containers
    /// and the corrected document is written back right away.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read (including when it does not exist).
    /// - `Parse` if the file is not a valid document.
    pub fn load(&self) -> Result<Document, SalesError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| SalesError::io(&self.path, e))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| SalesError::parse(&self.path, e))?;

        let missing: Vec<&str> = match value.as_object() {
            Some(object) => DOCUMENT_KEYS
                .into_iter()
                .filter(|key| !object.contains_key(*key))
                .collect(),
            None => Vec::new(),
        };

        let doc: Document =
            serde_json::from_value(value).map_err(|e| SalesError::parse(&self.path, e))?;

        if !missing.is_empty() {
            warn!(
                "The data file {} was missing {}, writing them back as empty",
                self.path.display(),
                missing.join(", ")
            );
            self.save(&doc)?;
        }
        debug!(
            "Loaded {} users, {} categories and {} sales from {}",
            doc.users.len(),
            doc.categories.len(),
            doc.sales.len(),
            self.path.display()
        );
        Ok(doc)
    }

    /// Overwrites the data file with `doc`, pretty-printed with a four space indent.
    pub fn save(&self, doc: &Document) -> Result<(), SalesError> {
        let data = utils::to_json_pretty(doc).map_err(|e| SalesError::parse(&self.path, e))?;
        std::fs::write(&self.path, data).map_err(|e| SalesError::io(&self.path, e))?;
        debug!("Saved {}", self.path.display());
        Ok(())
    }
}
