use std::io::Write;

use anyhow::Context;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;

const HEADER: [&str; 3] = ["owner", "balance", "bank"];

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub owner: &'a str,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub bank: Option<&'a str>,
}

/// Writes one row per account. The header is written even when there are no
/// accounts.
pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;
    for acc in accounts {
        let owner = acc.owner;
        writer
            .serialize(&acc)
            .with_context(|| format!("Failed to write balance of `{owner}`"))?;
    }
    writer.flush().context("Failed to flush account rows")
}
