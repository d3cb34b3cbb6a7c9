use crate::domain::account::Account;
use crate::domain::ledger::Ledger;
use crate::domain::ports::LedgerStore;
use crate::error::{BankError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk shape of the ledger: `{"accounts": {"<number>": {...}}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerDocument {
    accounts: BTreeMap<String, Account>,
}

impl From<&Ledger> for LedgerDocument {
    fn from(ledger: &Ledger) -> Self {
        Self {
            accounts: ledger
                .accounts()
                .map(|account| (account.account_number.to_string(), account.clone()))
                .collect(),
        }
    }
}

/// Keeps the whole ledger in a single JSON file.
///
/// `save` rewrites the file in place (open, write, close). A crash in the
/// middle of a write can leave a truncated file, which the next `load` treats
/// as malformed. Two processes sharing the file overwrite each other's changes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(bytes: &[u8]) -> Result<Ledger> {
        let document: LedgerDocument = serde_json::from_slice(bytes)
            .map_err(|e| BankError::MalformedStorage(e.to_string()))?;
        // Keyed by each record's own number; the map keys are not checked.
        Ok(Ledger::from_accounts(document.accounts.into_values()))
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> Result<Ledger> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger file absent, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(e.into()),
        };

        match Self::parse(&bytes) {
            Ok(ledger) => {
                debug!(path = %self.path.display(), accounts = ledger.len(), "ledger loaded");
                Ok(ledger)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable ledger file");
                Ok(Ledger::new())
            }
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&LedgerDocument::from(ledger))?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), accounts = ledger.len(), "ledger saved");
        Ok(())
    }
}
