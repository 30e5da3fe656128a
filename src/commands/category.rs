//! Catalog command handlers.

use crate::args::{AddCategoryArgs, AddSubcategoryArgs, PriceArgs};
use crate::commands::{open_session, plural, Out};
use crate::model::{Amount, Categories};
use crate::{Config, Result};
use anyhow::anyhow;

/// Adds a top-level category.
///
/// # Errors
///
/// - Returns an error if the name is blank or the category already exists.
pub fn add_category(config: Config, args: AddCategoryArgs) -> Result<Out<String>> {
    let mut session = open_session(&config, None)?;
    session.add_category(&args.name)?;
    let name = args.name.trim().to_string();
    Ok(Out::new(format!("Added category '{name}'"), name))
}

/// Adds a subcategory with a price, creating the category if it does not exist.
///
/// # Errors
///
/// - Returns an error if the category or name is blank, the price is not a non-negative number,
///   or the subcategory already exists in that category.
pub fn add_subcategory(config: Config, args: AddSubcategoryArgs) -> Result<Out<String>> {
    let mut session = open_session(&config, None)?;
    session.add_subcategory(&args.category, &args.name, &args.price)?;
    let name = args.name.trim().to_string();
    Ok(Out::new(
        format!(
            "Added subcategory '{name}' to '{}'",
            args.category.trim()
        ),
        name,
    ))
}

/// Lists all categories with their subcategories and prices.
pub fn list_categories(config: Config) -> Result<Out<Categories>> {
    let session = open_session(&config, None)?;
    let doc = session.document();
    let mut message = plural(doc.categories().count(), "category", "categories");
    for (name, category) in doc.categories() {
        message.push_str(&format!("\n** {name} **"));
        if category.is_empty() {
            message.push_str("\n   (no subcategories)");
        }
        for (sub, subcategory) in category.subcategories() {
            message.push_str(&format!(
                "\n   - {sub} (price: {} {})",
                subcategory.price(),
                config.currency()
            ));
        }
    }
    let categories: Categories = doc
        .categories()
        .map(|(name, category)| (name.to_string(), category.clone()))
        .collect();
    Ok(Out::new(message, categories))
}

/// Looks up the price of a subcategory.
///
/// # Errors
///
/// - Returns an error if the category or subcategory does not exist.
pub fn price(config: Config, args: PriceArgs) -> Result<Out<Amount>> {
    let session = open_session(&config, None)?;
    let price = session
        .document()
        .price(&args.category, &args.subcategory)
        .ok_or_else(|| {
            anyhow!(
                "'{}' has no subcategory '{}'",
                args.category,
                args.subcategory
            )
        })?;
    Ok(Out::new(
        format!(
            "{} > {}: {price} {}",
            args.category,
            args.subcategory,
            config.currency()
        ),
        price,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesError;
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[test]
    fn test_add_category_and_list() {
        let env = TestEnv::new();
        add_category(
            env.config(),
            AddCategoryArgs {
                name: " Snacks ".to_string(),
            },
        )
        .unwrap();
        add_subcategory(
            env.config(),
            AddSubcategoryArgs {
                category: "Drinks".to_string(),
                name: "Coffee".to_string(),
                price: "3.5".to_string(),
            },
        )
        .unwrap();

        let out = list_categories(env.config()).unwrap();
        let categories = out.structure().unwrap();
        assert_eq!(
            categories.keys().collect::<Vec<_>>(),
            vec!["Snacks", "Drinks"]
        );
        assert!(out.message().contains("** Snacks **\n   (no subcategories)"));
        assert!(out.message().contains("- Coffee (price: 3.50 €)"));
    }

    #[test]
    fn test_add_duplicate_category() {
        let env = TestEnv::new();
        env.insert_test_data();
        let err = add_category(
            env.config(),
            AddCategoryArgs {
                name: "Drinks".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SalesError>(),
            Some(SalesError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_add_subcategory_invalid_price() {
        let env = TestEnv::new();
        let err = add_subcategory(
            env.config(),
            AddSubcategoryArgs {
                category: "Drinks".to_string(),
                name: "Coffee".to_string(),
                price: "cheap".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SalesError>(),
            Some(SalesError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_price() {
        let env = TestEnv::new();
        env.insert_test_data();
        let out = price(
            env.config(),
            PriceArgs {
                category: "Food".to_string(),
                subcategory: "Cake".to_string(),
            },
        )
        .unwrap();
        assert_eq!(out.structure(), Some(&Amount::from_str("4.20").unwrap()));

        let missing = price(
            env.config(),
            PriceArgs {
                category: "Food".to_string(),
                subcategory: "Soup".to_string(),
            },
        );
        assert!(missing.is_err());
    }
}
