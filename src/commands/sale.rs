//! Sale command handlers.

use crate::args::{AddSaleArgs, DeleteSaleArgs, ListSalesArgs};
use crate::commands::{open_session, plural, Credentials, Out};
use crate::model::{NewSale, Sale};
use crate::{Config, Result};

/// Records a sale for the logged-in user.
///
/// When no amount is given the subcategory's price is used, and when no date is given the sale is
/// dated today.
///
/// # Returns
///
/// On success, returns an `Out` containing the id of the new sale.
///
/// # Errors
///
/// - Returns an error if nobody is logged in or the credentials are wrong.
/// - Returns an error if the category or subcategory is blank.
/// - Returns an error if the amount is not a non-negative number, or no amount was given and the
///   subcategory has no price.
pub fn add_sale(
    config: Config,
    credentials: Credentials<'_>,
    args: AddSaleArgs,
) -> Result<Out<u64>> {
    let mut session = open_session(&config, credentials)?;

    let amount = match args.amount {
        Some(amount) => amount,
        None => session
            .document()
            .price(args.category.trim(), args.subcategory.trim())
            .map(|price| price.value().to_string())
            .unwrap_or_default(),
    };
    let mut sale = NewSale::new(&args.category, &args.subcategory, amount);
    if let Some(date) = args.date {
        sale = sale.date(date);
    }
    if let Some(description) = args.description {
        sale = sale.description(description);
    }
    if let Some(buyer) = args.buyer {
        sale = sale.buyer(buyer);
    }

    let id = session.add_sale(sale)?;
    let message = match session.document().sale(id) {
        Some(sale) => format!(
            "Added sale #{id}: {} for {} {}",
            sale.category(),
            sale.amount(),
            config.currency()
        ),
        None => format!("Added sale #{id}"),
    };
    Ok(Out::new(message, id))
}

/// Deletes a sale by id and returns it.
///
/// # Errors
///
/// - Returns an error if no sale has that id.
pub fn delete_sale(config: Config, args: DeleteSaleArgs) -> Result<Out<Sale>> {
    let mut session = open_session(&config, None)?;
    let sale = session.delete_sale(args.id)?;
    Ok(Out::new(format!("Deleted sale #{}", sale.id()), sale))
}

/// Lists sales in the order they were recorded, optionally only those of one user.
pub fn list_sales(config: Config, args: ListSalesArgs) -> Result<Out<Vec<Sale>>> {
    let session = open_session(&config, None)?;
    let sales: Vec<Sale> = session
        .document()
        .sales(args.user.as_deref())
        .cloned()
        .collect();

    let mut message = plural(sales.len(), "sale", "sales");
    for sale in &sales {
        message.push_str(&format!(
            "\n  #{:<4} {:<10} {:<12} {:<24} {:>10} {}",
            sale.id(),
            sale.date(),
            sale.user(),
            sale.category(),
            sale.amount().to_string(),
            config.currency()
        ));
        if !sale.buyer().is_empty() {
            message.push_str(&format!("  buyer: {}", sale.buyer()));
        }
        if !sale.description().is_empty() {
            message.push_str(&format!("  ({})", sale.description()));
        }
    }
    Ok(Out::new(message, sales))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesError;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn coffee() -> AddSaleArgs {
        AddSaleArgs {
            category: "Drinks".to_string(),
            subcategory: "Coffee".to_string(),
            ..AddSaleArgs::default()
        }
    }

    fn downcast(err: &anyhow::Error) -> Option<&SalesError> {
        err.downcast_ref::<SalesError>()
    }

    #[test]
    fn test_add_sale_uses_price() {
        let env = TestEnv::new();
        env.insert_test_data();

        let out = add_sale(env.config(), Some(("bob", "bob-pw")), coffee()).unwrap();
        let id = *out.structure().unwrap();
        assert_eq!(id, 4);
        assert_eq!(out.message(), "Added sale #4: Drinks > Coffee for 3.50 €");

        let doc = env.config().store().load().unwrap();
        let sale = doc.sale(id).unwrap();
        assert_eq!(sale.user(), "bob");
        assert_eq!(sale.amount(), Amount::from_str("3.5").unwrap());
    }

    #[test]
    fn test_add_sale_with_explicit_fields() {
        let env = TestEnv::new();
        env.insert_test_data();
        let args = AddSaleArgs {
            amount: Some("3.00".to_string()),
            date: Some("2025-02-01".to_string()),
            description: Some("staff discount".to_string()),
            buyer: Some("Tom".to_string()),
            ..coffee()
        };

        let id = *add_sale(env.config(), Some(("alice", "alice-pw")), args)
            .unwrap()
            .structure()
            .unwrap();
        let doc = env.config().store().load().unwrap();
        let sale = doc.sale(id).unwrap();
        assert_eq!(sale.amount(), Amount::from_str("3").unwrap());
        assert_eq!(sale.date(), "2025-02-01");
        assert_eq!(sale.description(), "staff discount");
        assert_eq!(sale.buyer(), "Tom");
    }

    #[test]
    fn test_add_sale_not_logged_in() {
        let env = TestEnv::new();
        env.insert_test_data();
        let err = add_sale(env.config(), None, coffee()).unwrap_err();
        assert!(matches!(downcast(&err), Some(SalesError::NotAuthenticated)));
    }

    #[test]
    fn test_add_sale_unknown_subcategory_without_amount() {
        let env = TestEnv::new();
        env.insert_test_data();
        let args = AddSaleArgs {
            subcategory: "Espresso".to_string(),
            ..coffee()
        };
        let err = add_sale(env.config(), Some(("alice", "alice-pw")), args).unwrap_err();
        assert!(matches!(downcast(&err), Some(SalesError::InvalidAmount(_))));
    }

    #[test]
    fn test_add_sale_invalid_amount() {
        let env = TestEnv::new();
        env.insert_test_data();
        let args = AddSaleArgs {
            amount: Some("abc".to_string()),
            ..coffee()
        };
        let err = add_sale(env.config(), Some(("alice", "alice-pw")), args).unwrap_err();
        assert!(matches!(downcast(&err), Some(SalesError::InvalidAmount(_))));
        let doc = env.config().store().load().unwrap();
        assert_eq!(doc.sales(None).count(), 3);
    }

    #[test]
    fn test_delete_sale() {
        let env = TestEnv::new();
        env.insert_test_data();
        let out = delete_sale(env.config(), DeleteSaleArgs { id: 2 }).unwrap();
        assert_eq!(out.structure().unwrap().category(), "Drinks > Tea");

        let err = delete_sale(env.config(), DeleteSaleArgs { id: 2 }).unwrap_err();
        assert!(matches!(downcast(&err), Some(SalesError::NotFound(2))));
    }

    #[test]
    fn test_list_sales() {
        let env = TestEnv::new();
        env.insert_test_data();

        let out = list_sales(env.config(), ListSalesArgs::default()).unwrap();
        assert_eq!(out.structure().unwrap().len(), 3);
        assert!(out.message().starts_with("3 sales"));
        assert!(out.message().contains("buyer: Mrs. Weber"));

        let out = list_sales(
            env.config(),
            ListSalesArgs {
                user: Some("bob".to_string()),
            },
        )
        .unwrap();
        let ids: Vec<u64> = out.structure().unwrap().iter().map(Sale::id).collect();
        assert_eq!(ids, vec![3]);
    }
}
