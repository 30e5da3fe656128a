//! Registration and login checks.
//!
//! Passwords are stored as given and compared with plain string equality. This is not a security
//! boundary.

use crate::error::SalesError;
use crate::model::Document;

impl Document {
    /// # Errors
    ///
    /// - `EmptyName` if `username` is blank.
    /// - `UserExists` if `username` is already registered.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), SalesError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SalesError::EmptyName);
        }
        if self.users.contains_key(username) {
            return Err(SalesError::UserExists(username.to_string()));
        }
        self.users.insert(username.to_string(), password.to_string());
        Ok(())
    }

    /// True when `username` is registered with exactly `password`. Surrounding whitespace in
    /// `username` is ignored, as it is when registering.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username.trim())
            .is_some_and(|stored| stored == password)
    }

    /// Registered usernames in registration order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn is_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_authenticate() {
        let mut doc = Document::new();
        doc.register("alice", "secret").unwrap();
        assert!(doc.authenticate("alice", "secret"));
        assert!(!doc.authenticate("alice", "Secret"));
        assert!(!doc.authenticate("bob", "secret"));
        assert!(doc.is_user("alice"));
    }

    #[test]
    fn test_register_existing_user() {
        let mut doc = Document::new();
        doc.register("alice", "one").unwrap();
        let err = doc.register("alice", "two").unwrap_err();
        assert!(matches!(err, SalesError::UserExists(u) if u == "alice"));
        assert!(doc.authenticate("alice", "one"));
    }

    #[test]
    fn test_register_empty_username() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.register(" ", "pw").unwrap_err(),
            SalesError::EmptyName
        ));
        assert_eq!(doc.users().count(), 0);
    }

    #[test]
    fn test_register_trims_username() {
        let mut doc = Document::new();
        doc.register(" alice", "one").unwrap();
        assert_eq!(doc.users().collect::<Vec<_>>(), vec!["alice"]);
        let err = doc.register("alice ", "two").unwrap_err();
        assert!(matches!(err, SalesError::UserExists(u) if u == "alice"));
        assert!(doc.authenticate(" alice ", "one"));
    }

    #[test]
    fn test_empty_password_is_allowed() {
        let mut doc = Document::new();
        doc.register("kiosk", "").unwrap();
        assert!(doc.authenticate("kiosk", ""));
    }

    #[test]
    fn test_users_in_registration_order() {
        let mut doc = Document::new();
        doc.register("zoe", "x").unwrap();
        doc.register("adam", "y").unwrap();
        assert_eq!(doc.users().collect::<Vec<_>>(), vec!["zoe", "adam"]);
    }
}
