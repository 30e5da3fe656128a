use crate::error::SalesError;
use crate::model::{Amount, Document};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A top-level category and its subcategories.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    subcategories: IndexMap<String, Subcategory>,
}

impl Category {
    /// Subcategories in the order they were added.
    pub fn subcategories(&self) -> impl Iterator<Item = (&str, &Subcategory)> {
        self.subcategories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.subcategories.is_empty()
    }
}

/// A sellable item within a category. Its price pre-fills the amount of a new sale.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(default)]
    price: Amount,
}

impl Subcategory {
    pub fn new(price: Amount) -> Self {
        Self { price }
    }

    pub fn price(&self) -> Amount {
        self.price
    }
}

impl Document {
    /// Adds an empty category.
    ///
    /// # Errors
    ///
    /// - `EmptyName` if `name` is blank.
    /// - `DuplicateCategory` if a category with the same (trimmed) name exists.
    pub fn add_category(&mut self, name: &str) -> Result<(), SalesError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SalesError::EmptyName);
        }
        if self.categories.contains_key(name) {
            return Err(SalesError::DuplicateCategory(name.to_string()));
        }
        self.categories.insert(name.to_string(), Category::default());
        Ok(())
    }

    /// Adds a subcategory with the price given as user-entered text. The parent category is
    /// created if it does not exist yet.
    ///
    /// Nothing is changed unless every check passes.
    ///
    /// # Errors
    ///
    /// - `MissingCategory` if `category` is blank.
    /// - `EmptyName` if `name` is blank.
    /// - `InvalidPrice` if `price` is not a non-negative number the data file can hold exactly.
    /// - `DuplicateSubcategory` if `name` already exists under `category`.
    pub fn add_subcategory(
        &mut self,
        category: &str,
        name: &str,
        price: &str,
    ) -> Result<(), SalesError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(SalesError::MissingCategory);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SalesError::EmptyName);
        }
        let price: Amount = price
            .parse()
            .map_err(|_| SalesError::InvalidPrice(price.trim().to_string()))?;

        if self
            .category(category)
            .is_some_and(|c| c.subcategory(name).is_some())
        {
            return Err(SalesError::DuplicateSubcategory {
                category: category.to_string(),
                subcategory: name.to_string(),
            });
        }

        self.categories
            .entry(category.to_string())
            .or_default()
            .subcategories
            .insert(name.to_string(), Subcategory::new(price));
        Ok(())
    }

    /// All categories in the order they were added.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// The price of `category > subcategory`, if both exist.
    pub fn price(&self, category: &str, subcategory: &str) -> Option<Amount> {
        self.category(category)?
            .subcategory(subcategory)
            .map(Subcategory::price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_add_category() {
        let mut doc = Document::new();
        doc.add_category("Drinks").unwrap();
        let category = doc.category("Drinks").unwrap();
        assert!(category.is_empty());
    }

    #[test]
    fn test_add_category_trims_name() {
        let mut doc = Document::new();
        doc.add_category("  Drinks ").unwrap();
        assert!(doc.category("Drinks").is_some());
    }

    #[test]
    fn test_add_category_duplicate() {
        let mut doc = Document::new();
        doc.add_category("Drinks").unwrap();
        doc.add_subcategory("Drinks", "Coffee", "3.5").unwrap();
        let before = doc.clone();

        let err = doc.add_category("Drinks").unwrap_err();
        assert!(matches!(err, SalesError::DuplicateCategory(name) if name == "Drinks"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_category_empty_name() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.add_category("   ").unwrap_err(),
            SalesError::EmptyName
        ));
        assert_eq!(doc.categories().count(), 0);
    }

    #[test]
    fn test_add_subcategory() {
        let mut doc = Document::new();
        doc.add_category("Drinks").unwrap();
        doc.add_subcategory("Drinks", "Coffee", "3.50").unwrap();
        assert_eq!(doc.price("Drinks", "Coffee"), Some(amount("3.5")));
    }

    #[test]
    fn test_add_subcategory_creates_parent() {
        let mut doc = Document::new();
        doc.add_subcategory("Food", "Cake", "4").unwrap();
        assert_eq!(doc.price("Food", "Cake"), Some(amount("4")));
    }

    #[test]
    fn test_add_subcategory_missing_category() {
        let mut doc = Document::new();
        let err = doc.add_subcategory("", "Cake", "4").unwrap_err();
        assert!(matches!(err, SalesError::MissingCategory));
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_add_subcategory_invalid_price_changes_nothing() {
        let mut doc = Document::new();
        let err = doc.add_subcategory("Food", "Cake", "four").unwrap_err();
        assert!(matches!(err, SalesError::InvalidPrice(p) if p == "four"));
        let err = doc.add_subcategory("Food", "Cake", "-4").unwrap_err();
        assert!(matches!(err, SalesError::InvalidPrice(_)));
        // The parent category must not be created by a failed call.
        assert!(doc.category("Food").is_none());
    }

    #[test]
    fn test_add_subcategory_duplicate() {
        let mut doc = Document::new();
        doc.add_subcategory("Drinks", "Coffee", "3.5").unwrap();
        let err = doc.add_subcategory("Drinks", "Coffee", "9").unwrap_err();
        assert!(matches!(err, SalesError::DuplicateSubcategory { .. }));
        assert_eq!(doc.price("Drinks", "Coffee"), Some(amount("3.5")));
    }

    #[test]
    fn test_same_subcategory_name_in_two_categories() {
        let mut doc = Document::new();
        doc.add_subcategory("Drinks", "Large", "3").unwrap();
        doc.add_subcategory("Food", "Large", "8").unwrap();
        assert_eq!(doc.price("Drinks", "Large"), Some(amount("3")));
        assert_eq!(doc.price("Food", "Large"), Some(amount("8")));
    }

    #[test]
    fn test_price_absent() {
        let mut doc = Document::new();
        doc.add_category("Drinks").unwrap();
        assert_eq!(doc.price("Drinks", "Coffee"), None);
        assert_eq!(doc.price("Nope", "Coffee"), None);
    }

    #[test]
    fn test_categories_listing_order() {
        let mut doc = Document::new();
        doc.add_category("Snacks").unwrap();
        doc.add_subcategory("Drinks", "Tea", "2").unwrap();
        doc.add_subcategory("Drinks", "Coffee", "3").unwrap();

        let listing: Vec<(&str, Vec<&str>)> = doc
            .categories()
            .map(|(name, c)| (name, c.subcategories().map(|(s, _)| s).collect()))
            .collect();
        assert_eq!(
            listing,
            vec![("Snacks", vec![]), ("Drinks", vec!["Tea", "Coffee"])]
        );
    }

    #[test]
    fn test_legacy_subcategory_without_price() {
        let category: Category =
            serde_json::from_str(r#"{"subcategories": {"Coffee": {}}}"#).unwrap();
        assert_eq!(category.subcategory("Coffee").unwrap().price(), Amount::ZERO);
    }
}
