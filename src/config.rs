//! Configuration file handling.
//!
//! The configuration file is stored at `$SALES_HOME/config.json` and contains settings for the
//! application including the location of the data file, backup settings and the currency sign
//! used when printing amounts.

use crate::backup::Backup;
use crate::{utils, Result, Store};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "sales";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const DATA_JSON: &str = "sales_data.json";
const CURRENCY: &str = "€";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SALES_HOME` and from there it loads `$SALES_HOME/config.json`. It provides paths
/// to the data file and the backups directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_path: PathBuf,
}

impl Config {
    /// Sets up the data directory:
    /// - Creates `dir` and its backups subdirectory
    /// - Writes an initial `config.json` with default settings, unless one already exists
    /// - Writes an empty data file, unless one already exists
    ///
    /// Running it against an existing directory leaves the data untouched.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the sales home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups)?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            debug!("Keeping existing config file {}", config_path.display());
            ConfigFile::load(&config_path)?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path)?;
            config_file
        };

        let config = Self {
            data_path: resolve(&root, config_file.data_file()),
            root,
            backups,
            config_path,
            config_file,
        };

        if config.store().init()? {
            debug!("Created data file {}", config.data_path.display());
        }
        Ok(config)
    }

    /// This will
    /// - validate that `sales_home` and its config file exist
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub fn load(sales_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = sales_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .context("Sales home is missing, did you run 'sales init'?")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', did you run 'sales init'?",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        let config = Self {
            backups: root.join(BACKUPS),
            data_path: resolve(&root, config_file.data_file()),
            root,
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The sign printed after amounts, e.g. `€`.
    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    /// A store for the configured data file.
    pub fn store(&self) -> Store {
        Store::new(&self.data_path)
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Returns `p` if it is absolute, otherwise joins it to `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "sales",
///   "config_version": 1,
///   "backup_copies": 5,
///   "currency": "€",
///   "data_file": "sales_data.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "sales"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep
    backup_copies: u32,

    /// Currency sign shown next to amounts
    #[serde(default = "default_currency")]
    currency: String,

    /// Path to the data file (optional, relative to $SALES_HOME or absolute)
    /// Defaults to $SALES_HOME/sales_data.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,
}

fn default_currency() -> String {
    CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            currency: default_currency(),
            data_file: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or belongs to another application.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    /// Gets the data file path.
    ///
    /// If the path is relative, it should be interpreted as relative to $SALES_HOME.
    fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_JSON))
    }
}
