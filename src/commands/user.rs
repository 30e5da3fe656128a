//! User command handlers.

use crate::args::RegisterArgs;
use crate::commands::{open_session, plural, Credentials, Out};
use crate::{Config, Result};
use anyhow::bail;

/// Registers a new user. The password is stored as given.
///
/// # Errors
///
/// - Returns an error if the username is blank or already registered.
/// - Returns an error if the data file cannot be read or written.
pub fn register(config: Config, args: RegisterArgs) -> Result<Out<String>> {
    let mut session = open_session(&config, None)?;
    session.register(&args.username, &args.password)?;
    let username = args.username.trim().to_string();
    Ok(Out::new(format!("Registered user '{username}'"), username))
}

/// Checks the credentials passed with `--user` and `--password`.
pub fn login(config: Config, credentials: Credentials<'_>) -> Result<Out<String>> {
    if credentials.is_none() {
        bail!("Pass --user and --password (or set SALES_USER and SALES_PASSWORD) to log in");
    }
    let session = open_session(&config, credentials)?;
    let user = session.current_user().unwrap_or_default().to_string();
    Ok(Out::new(format!("Welcome back, {user}!"), user))
}

/// Lists registered usernames in registration order.
pub fn list_users(config: Config) -> Result<Out<Vec<String>>> {
    let session = open_session(&config, None)?;
    let users: Vec<String> = session.document().users().map(String::from).collect();
    let mut message = plural(users.len(), "registered user", "registered users");
    for user in &users {
        message.push_str(&format!("\n  {user}"));
    }
    Ok(Out::new(message, users))
}
