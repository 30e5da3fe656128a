//! Revenue rollups over the sales ledger.
//!
//! Everything here is computed from the document on each call; nothing is cached.

use crate::model::{Amount, Document, Sale};
use indexmap::IndexMap;
use serde::Serialize;

/// Summed revenue and number of sales for some grouping.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct Totals {
    pub revenue: Amount,
    pub count: usize,
}

impl Totals {
    pub fn new(revenue: Amount, count: usize) -> Self {
        Self { revenue, count }
    }

    fn add(&mut self, sale: &Sale) {
        self.revenue += sale.amount();
        self.count += 1;
    }
}

impl<'a> FromIterator<&'a Sale> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Sale>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for sale in iter {
            totals.add(sale);
        }
        totals
    }
}

/// Totals for every registered user, in registration order. Users without sales get a zero
/// rollup; sales logged under a name that is not registered are not counted.
pub fn per_user_totals(doc: &Document) -> IndexMap<String, Totals> {
    let mut totals: IndexMap<String, Totals> = doc
        .users()
        .map(|user| (user.to_string(), Totals::default()))
        .collect();
    for sale in doc.sales(None) {
        if let Some(t) = totals.get_mut(sale.user()) {
            t.add(sale);
        }
    }
    totals
}

/// Groups `sales` by their exact `category` string, in the order each group first appears.
/// Grouping is case-sensitive.
pub fn per_category_totals<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
) -> IndexMap<String, Totals> {
    let mut totals: IndexMap<String, Totals> = IndexMap::new();
    for sale in sales {
        totals
            .entry(sale.category().to_string())
            .or_default()
            .add(sale);
    }
    totals
}

/// Totals across all sales, whoever logged them.
pub fn grand_total(doc: &Document) -> Totals {
    doc.sales(None).collect()
}

/// Revenue per category string over all sales; the series behind the bar chart.
pub fn revenue_by_category(doc: &Document) -> Vec<(String, Amount)> {
    per_category_totals(doc.sales(None))
        .into_iter()
        .map(|(category, totals)| (category, totals.revenue))
        .collect()
}

/// One sale as it appears at the bottom of the dashboard tree.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SaleLine {
    pub id: u64,
    pub date: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CategoryRollup {
    pub category: String,
    pub totals: Totals,
    pub sales: Vec<SaleLine>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct UserRollup {
    pub user: String,
    pub totals: Totals,
    pub categories: Vec<CategoryRollup>,
}

/// The user -> category -> sale tree shown on the dashboard, plus the overall total.
///
/// `total` covers every sale. Sales logged under names that are not registered have no place in
/// the tree and are summed in `unregistered`, so the user rows plus `unregistered` add up to
/// `total`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Dashboard {
    pub users: Vec<UserRollup>,
    pub unregistered: Totals,
    pub total: Totals,
}

pub fn dashboard(doc: &Document) -> Dashboard {
    let users = per_user_totals(doc)
        .into_iter()
        .map(|(user, totals)| {
            let sales: Vec<&Sale> = doc.sales(Some(user.as_str())).collect();
            let categories = per_category_totals(sales.iter().copied())
                .into_iter()
                .map(|(category, totals)| {
                    let lines = sales
                        .iter()
                        .filter(|s| s.category() == category)
                        .map(|s| SaleLine {
                            id: s.id(),
                            date: s.date().to_string(),
                            amount: s.amount(),
                        })
                        .collect();
                    CategoryRollup {
                        category,
                        totals,
                        sales: lines,
                    }
                })
                .collect();
            UserRollup {
                user,
                totals,
                categories,
            }
        })
        .collect();

    Dashboard {
        users,
        unregistered: doc.sales(None).filter(|s| !doc.is_user(s.user())).collect(),
        total: grand_total(doc),
    }
}
