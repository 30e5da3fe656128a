//! The `sales report` command.

use crate::args::{ReportArgs, ReportKind};
use crate::commands::{open_session, plural, Out};
use crate::model::Amount;
use crate::report::{self, Dashboard, Totals};
use crate::{Config, Result};
use indexmap::IndexMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Width of the longest bar in the revenue chart.
const CHART_WIDTH: usize = 40;

/// The structured output of `sales report`, one variant per [`ReportKind`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Dashboard(Dashboard),
    Users(IndexMap<String, Totals>),
    Categories(IndexMap<String, Totals>),
    Total(Totals),
    Chart(Vec<(String, Amount)>),
}

/// Computes the requested rollup from the current data file.
pub fn report(config: Config, args: ReportArgs) -> Result<Out<Report>> {
    let session = open_session(&config, None)?;
    let doc = session.document();
    let currency = config.currency();

    let (message, report) = match args.kind() {
        ReportKind::Dashboard => {
            let dashboard = report::dashboard(doc);
            (render_dashboard(&dashboard, currency), Report::Dashboard(dashboard))
        }
        ReportKind::Users => {
            let totals = report::per_user_totals(doc);
            (render_totals(&totals, currency), Report::Users(totals))
        }
        ReportKind::Categories => {
            let totals = report::per_category_totals(doc.sales(None));
            (render_totals(&totals, currency), Report::Categories(totals))
        }
        ReportKind::Total => {
            let total = report::grand_total(doc);
            (
                format!("Total: {}", describe(&total, currency)),
                Report::Total(total),
            )
        }
        ReportKind::Chart => {
            let series = report::revenue_by_category(doc);
            (render_chart(&series, currency), Report::Chart(series))
        }
    };
    Ok(Out::new(message, report))
}

/// `5.50 € (2 sales)`
fn describe(totals: &Totals, currency: &str) -> String {
    format!(
        "{} {currency} ({})",
        totals.revenue,
        plural(totals.count, "sale", "sales")
    )
}

fn render_dashboard(dashboard: &Dashboard, currency: &str) -> String {
    let mut lines = Vec::new();
    for user in &dashboard.users {
        lines.push(format!("{}: {}", user.user, describe(&user.totals, currency)));
        for category in &user.categories {
            lines.push(format!(
                "  {}: {}",
                category.category,
                describe(&category.totals, currency)
            ));
            for sale in &category.sales {
                lines.push(format!(
                    "    #{} {} {} {currency}",
                    sale.id, sale.date, sale.amount
                ));
            }
        }
    }
    if dashboard.unregistered.count > 0 {
        lines.push(format!(
            "Unregistered users: {}",
            describe(&dashboard.unregistered, currency)
        ));
    }
    lines.push(format!("Total: {}", describe(&dashboard.total, currency)));
    lines.join("\n")
}

fn render_totals(totals: &IndexMap<String, Totals>, currency: &str) -> String {
    if totals.is_empty() {
        return "Nothing to report".to_string();
    }
    totals
        .iter()
        .map(|(name, t)| format!("{name}: {}", describe(t, currency)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_chart(series: &[(String, Amount)], currency: &str) -> String {
    if series.is_empty() {
        return "No sales to chart".to_string();
    }
    let label_width = series.iter().map(|(c, _)| c.chars().count()).max().unwrap_or(0);
    let max = series
        .iter()
        .map(|(_, revenue)| revenue.value())
        .max()
        .unwrap_or_default();
    series
        .iter()
        .map(|(category, revenue)| {
            let bar = "#".repeat(bar_length(revenue.value(), max));
            format!("{category:<label_width$} | {bar} {revenue} {currency}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scales `value` against `max` so the largest bar is `CHART_WIDTH` characters long.
fn bar_length(value: Decimal, max: Decimal) -> usize {
    if max.is_zero() {
        return 0;
    }
    (value / max * Decimal::from(CHART_WIDTH))
        .round()
        .to_usize()
        .unwrap_or_default()
}
