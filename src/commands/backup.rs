use crate::commands::Out;
use crate::{Config, Result};
use std::path::PathBuf;

/// Copies the data file into the backups directory, rotating out the oldest copies.
pub fn backup(config: Config) -> Result<Out<PathBuf>> {
    let path = config.backup().copy_data_file()?;
    Ok(Out::new(
        format!("Backed up the data file to {}", path.display()),
        path,
    ))
}
