//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::NewSale;
use crate::{Config, Session};
use tempfile::TempDir;

/// Test environment that sets up a sales home directory with a Config and an empty data file.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with Config and initialized data file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("sales");
        let config = Config::create(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Opens a session on the environment's data file. Nobody is logged in.
    pub fn session(&self) -> Session {
        Session::open(self.config.store()).unwrap()
    }

    /// Seeds the data file with two users, a small catalog and three sales:
    ///
    /// 1. alice, Drinks > Coffee, 3.50
    /// 2. alice, Drinks > Tea, 2.00
    /// 3. bob, Food > Cake, 4.20
    pub fn insert_test_data(&self) {
        let mut session = self.session();
        session.register("alice", "alice-pw").unwrap();
        session.register("bob", "bob-pw").unwrap();
        session.add_subcategory("Drinks", "Coffee", "3.50").unwrap();
        session.add_subcategory("Drinks", "Tea", "2.00").unwrap();
        session.add_subcategory("Food", "Cake", "4.20").unwrap();

        session.login("alice", "alice-pw");
        session
            .add_sale(NewSale::new("Drinks", "Coffee", "3.50").date("2025-01-15"))
            .unwrap();
        session
            .add_sale(NewSale::new("Drinks", "Tea", "2.00").date("2025-01-16"))
            .unwrap();

        session.login("bob", "bob-pw");
        session
            .add_sale(
                NewSale::new("Food", "Cake", "4.20")
                    .date("2025-01-16")
                    .buyer("Mrs. Weber")
                    .description("birthday"),
            )
            .unwrap();
    }
}
