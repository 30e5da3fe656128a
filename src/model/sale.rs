use crate::error::SalesError;
use crate::model::{Amount, Document};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Joins the category and subcategory names in a sale's `category` field.
pub const CATEGORY_SEPARATOR: &str = " > ";

/// A single recorded sale.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    id: u64,
    user: String,
    /// `"<category> > <subcategory>"`
    category: String,
    /// Free-form, usually `YYYY-MM-DD`.
    date: String,
    amount: Amount,
    #[serde(default)]
    description: String,
    #[serde(default)]
    buyer: String,
}

impl Sale {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn buyer(&self) -> &str {
        &self.buyer
    }

    /// Builds the `category` value stored on a sale.
    pub fn category_path(category: &str, subcategory: &str) -> String {
        format!("{category}{CATEGORY_SEPARATOR}{subcategory}")
    }

    /// Splits `category` back into category and subcategory names.
    pub fn split_category(&self) -> Option<(&str, &str)> {
        self.category.split_once(CATEGORY_SEPARATOR)
    }
}

/// The form input for a new sale. `amount` is kept as text and validated by
/// [`Document::add_sale`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct NewSale {
    pub category: String,
    pub subcategory: String,
    pub date: String,
    pub amount: String,
    pub description: String,
    pub buyer: String,
}

impl NewSale {
    /// Creates the input for a sale dated today with empty description and buyer.
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            date: Local::now().format("%Y-%m-%d").to_string(),
            amount: amount.into(),
            description: String::new(),
            buyer: String::new(),
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn buyer(mut self, buyer: impl Into<String>) -> Self {
        self.buyer = buyer.into();
        self
    }
}

impl Document {
    /// Appends a sale logged by `user` and returns its id.
    ///
    /// Ids are one more than the largest id in the ledger, so an id freed by a deletion in the
    /// middle of the ledger is never handed out again while a later sale still holds a larger one.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` if there is no current user.
    /// - `MissingSelection` if the category or subcategory is blank.
    /// - `InvalidAmount` if the amount is not a non-negative number the data file can hold exactly.
    pub fn add_sale(&mut self, user: Option<&str>, sale: NewSale) -> Result<u64, SalesError> {
        let user = match user {
            Some(user) if !user.is_empty() => user,
            _ => return Err(SalesError::NotAuthenticated),
        };
        let category = sale.category.trim();
        let subcategory = sale.subcategory.trim();
        if category.is_empty() || subcategory.is_empty() {
            return Err(SalesError::MissingSelection);
        }
        let amount: Amount = sale
            .amount
            .parse()
            .map_err(|_| SalesError::InvalidAmount(sale.amount.trim().to_string()))?;

        let id = self.next_sale_id();
        self.sales.push(Sale {
            id,
            user: user.to_string(),
            category: Sale::category_path(category, subcategory),
            date: sale.date,
            amount,
            description: sale.description,
            buyer: sale.buyer,
        });
        Ok(id)
    }

    /// Removes the sale with `id` and returns it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no sale has that id.
    pub fn delete_sale(&mut self, id: u64) -> Result<Sale, SalesError> {
        let ix = self
            .sales
            .iter()
            .position(|s| s.id == id)
            .ok_or(SalesError::NotFound(id))?;
        Ok(self.sales.remove(ix))
    }

    /// Sales in the order they were recorded, optionally only those logged by `user`.
    pub fn sales<'a>(&'a self, user: Option<&'a str>) -> impl Iterator<Item = &'a Sale> + 'a {
        self.sales
            .iter()
            .filter(move |s| user.map_or(true, |u| s.user == u))
    }

    pub fn sale(&self, id: u64) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    pub(crate) fn next_sale_id(&self) -> u64 {
        self.sales.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }
}
