use super::ledger::Ledger;
use crate::error::Result;
use async_trait::async_trait;

/// Where the ledger lives between runs.
///
/// Every save replaces the whole stored ledger; there is no incremental update.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns the stored ledger. A missing or unreadable document yields an
    /// empty ledger instead of an error.
    async fn load(&self) -> Result<Ledger>;
    async fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
