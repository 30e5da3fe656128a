use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates the sales home directory, its subdirectories and:
/// - Creates an initial `config.json` file with default settings
/// - Creates an empty data file
///
/// Existing config and data files are kept as they are.
///
/// # Arguments
/// - `sales_home` - The directory that will be the root of data directory, e.g. `$HOME/sales`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub fn init(sales_home: &Path) -> Result<Out<PathBuf>> {
    let config = Config::create(sales_home)
        .context("Unable to create the data directory and configs")?;
    let data_path = config.data_path().to_path_buf();
    Ok(Out::new(
        format!(
            "The sales home directory is ready, data is stored in {}",
            data_path.display()
        ),
        data_path,
    ))
}
