use crate::domain::account::Account;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One exported row. Passwords are never written out.
#[derive(Serialize)]
struct AccountRow<'a> {
    name: &'a str,
    account_number: u64,
    balance: i64,
}

const HEADER: [&str; 3] = ["name", "account_number", "balance"];

/// Writes accounts as CSV with a `name,account_number,balance` header.
///
/// The header is written even when there are no accounts.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes the header, then one row per account in the order given.
    pub fn write_accounts<'a>(
        &mut self,
        accounts: impl IntoIterator<Item = &'a Account>,
    ) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for account in accounts {
            self.writer.serialize(AccountRow {
                name: &account.name,
                account_number: account.account_number.value(),
                balance: account.balance,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
