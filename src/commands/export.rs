//! The `sales export` command writes the sales ledger as CSV.

use crate::args::ExportArgs;
use crate::commands::{open_session, plural, Out};
use crate::model::Sale;
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::io::{self, Write};

/// One CSV row. Amounts are written unrounded, without thousands separators.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: u64,
    user: &'a str,
    category: &'a str,
    date: &'a str,
    amount: String,
    description: &'a str,
    buyer: &'a str,
}

impl<'a> From<&'a Sale> for ExportRow<'a> {
    fn from(sale: &'a Sale) -> Self {
        Self {
            id: sale.id(),
            user: sale.user(),
            category: sale.category(),
            date: sale.date(),
            amount: sale.amount().value().to_string(),
            description: sale.description(),
            buyer: sale.buyer(),
        }
    }
}

/// Writes every sale to the `--output` file, or to stdout when no file is given.
///
/// # Returns
///
/// On success, returns an `Out` containing the number of rows written.
pub fn export(config: Config, args: ExportArgs) -> Result<Out<usize>> {
    let session = open_session(&config, None)?;
    let sales = session.document().sales(None);

    let count = match args.output() {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("unable to create file {}", path.display()))?;
            write_csv(file, sales)?
        }
        None => write_csv(io::stdout().lock(), sales)?,
    };

    let destination = match args.output() {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };
    Ok(Out::new(
        format!("Exported {} to {destination}", plural(count, "sale", "sales")),
        count,
    ))
}

fn write_csv<'a, W: Write>(w: W, sales: impl Iterator<Item = &'a Sale>) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(w);
    let mut count = 0;
    for sale in sales {
        wtr.serialize(ExportRow::from(sale))
            .context("unable to write CSV row")?;
        count += 1;
    }
    // Headers are only written with the first row.
    if count == 0 {
        wtr.write_record([
            "id",
            "user",
            "category",
            "date",
            "amount",
            "description",
            "buyer",
        ])?;
    }
    wtr.flush().context("unable to flush CSV output")?;
    Ok(count)
}
