//! Command handlers for the sales CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod backup;
mod category;
mod export;
mod init;
mod report;
mod sale;
mod user;

use crate::{Config, Result, Session};
use anyhow::bail;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use backup::backup;
pub use category::{add_category, add_subcategory, list_categories, price};
pub use export::export;
pub use init::init;
pub use report::{report, Report};
pub use sale::{add_sale, delete_sale, list_sales};
pub use user::{list_users, login, register};

/// A username and password pair given on the command line.
pub type Credentials<'a> = Option<(&'a str, &'a str)>;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Opens a session on the configured data file and logs in with `credentials` when given.
///
/// # Errors
///
/// - Returns an error if the data file cannot be loaded.
/// - Returns an error if credentials were given but do not match a registered user.
fn open_session(config: &Config, credentials: Credentials<'_>) -> Result<Session> {
    let mut session = Session::open(config.store())?;
    if let Some((user, password)) = credentials {
        if !session.login(user, password) {
            bail!("Invalid username or password");
        }
    }
    Ok(session)
}

/// `1 sale`, `2 sales`
fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}
