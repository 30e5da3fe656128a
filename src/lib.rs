//! Sales tracking on a single JSON data file: users, a two-level product catalog with prices, a
//! ledger of sales and the revenue rollups computed from it.

pub mod args;
mod backup;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod report;
mod session;
mod store;
mod utils;

#[cfg(test)]
mod test;

pub use backup::Backup;
pub use config::Config;
pub use error::{Error, Result, SalesError};
pub use model::{Amount, Document};
pub use session::Session;
pub use store::Store;
