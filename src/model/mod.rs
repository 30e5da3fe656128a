//! Types that represent the persisted data model, such as `Document`, `Category` and `Sale`, and
//! the operations that change them.
//!
//! None of these operations touch the disk. A caller mutates the `Document` and then saves it
//! through a [`Store`](crate::Store), which is what [`Session`](crate::Session) does for every
//! successful change.
mod amount;
mod catalog;
mod sale;
mod users;

pub use amount::{Amount, AmountError};
pub use catalog::{Category, Subcategory};
pub use sale::{NewSale, Sale, CATEGORY_SEPARATOR};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Username -> password. Passwords are stored exactly as they were given.
pub type Users = IndexMap<String, String>;

/// Category name -> category.
pub type Categories = IndexMap<String, Category>;

/// The entire persisted state: users, sales and the category catalog.
///
/// All three keys are optional when reading so that older data files, which may lack any of
/// them, are accepted and filled with empty containers.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub(crate) users: Users,
    #[serde(default)]
    pub(crate) sales: Vec<Sale>,
    #[serde(default)]
    pub(crate) categories: Categories,
}

/// The top-level keys of the data file.
pub(crate) const USERS_KEY: &str = "users";
pub(crate) const SALES_KEY: &str = "sales";
pub(crate) const CATEGORIES_KEY: &str = "categories";
pub(crate) const DOCUMENT_KEYS: [&str; 3] = [USERS_KEY, SALES_KEY, CATEGORIES_KEY];

impl Document {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_serializes_all_keys() {
        let json = serde_json::to_string(&Document::new()).unwrap();
        assert_eq!(json, r#"{"users":{},"sales":[],"categories":{}}"#);
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let doc: Document = serde_json::from_str(r#"{"users": {"alice": "pw"}}"#).unwrap();
        assert_eq!(doc.users.len(), 1);
        assert!(doc.sales.is_empty());
        assert!(doc.categories.is_empty());
    }

    #[test]
    fn test_mapping_order_is_preserved() {
        let json = r#"{
            "categories": {
                "Zebra": {"subcategories": {}},
                "Apple": {"subcategories": {}}
            }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = doc.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zebra", "Apple"]);
    }
}
