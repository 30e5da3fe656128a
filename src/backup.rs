//! Backup management for copies of the data file.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    data_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            data_path: config.data_path().to_path_buf(),
        }
    }

    /// Copies the data file to the backups directory.
    ///
    /// The filename format is `{stem}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file.
    pub fn copy_data_file(&self) -> Result<PathBuf> {
        let prefix = self.prefix();
        let date = today();
        let seq = self.next_sequence_number(&prefix, &date)?;
        let path = self
            .backups_dir
            .join(format!("{prefix}.{date}-{seq:03}.json"));

        utils::copy(&self.data_path, &path)?;

        self.rotate(&prefix)?;

        Ok(path)
    }

    /// Backup files are named after the data file, e.g. `sales_data` for `sales_data.json`.
    fn prefix(&self) -> String {
        self.data_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "data".to_string())
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        for entry in utils::read_dir(&self.backups_dir)? {
            let entry = entry.context("Failed to read directory entry")?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();
        for entry in utils::read_dir(&self.backups_dir)? {
            let entry = entry.context("Failed to read directory entry")?;
            let name = entry.file_name().to_string_lossy().to_string();
            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove(&path)?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match `{prefix}.{date}-{NNN}.json`.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}
