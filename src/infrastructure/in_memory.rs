use crate::domain::ledger::Ledger;
use crate::domain::ports::LedgerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// A ledger store that never touches the disk.
///
/// Clones share the same contents, so a test can keep a handle and inspect
/// what the bank wrote. `saves` counts every `save` call.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    ledger: Arc<RwLock<Ledger>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `ledger` already stored. Does not count as a save.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            saves: Arc::default(),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Ledger {
        self.ledger.read().await.clone()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn load(&self) -> Result<Ledger> {
        Ok(self.ledger.read().await.clone())
    }

    async fn save(&self, ledger: &Ledger) -> Result<()> {
        *self.ledger.write().await = ledger.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::default_accounts;

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = InMemoryLedgerStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let ledger = Ledger::from_accounts(default_accounts());
        store.save(&ledger).await.unwrap();

        assert_eq!(store.load().await.unwrap(), ledger);
        assert_eq!(store.saves(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = InMemoryLedgerStore::new();
        let handle = store.clone();

        store
            .save(&Ledger::from_accounts(default_accounts()))
            .await
            .unwrap();

        assert_eq!(handle.snapshot().await.len(), 2);
        assert_eq!(handle.saves(), 1);
    }
}
