use crate::domain::account::{Account, AccountNumber};
use crate::domain::ledger::Ledger;
use crate::domain::ports::LedgerStoreBox;
use crate::domain::session::Session;
use crate::error::{BankError, Result};
use tracing::{info, warn};

/// The teller: a loaded ledger, the store it is flushed to, and who is
/// logged in.
pub struct Bank {
    store: LedgerStoreBox,
    ledger: Ledger,
    session: Session,
}

impl Bank {
    /// Loads the ledger from `store` and makes sure the default accounts exist.
    pub async fn open(store: LedgerStoreBox) -> Result<Self> {
        let ledger = store.load().await?;
        let mut bank = Self {
            store,
            ledger,
            session: Session::LoggedOut,
        };
        bank.seed_defaults().await?;
        Ok(bank)
    }

    /// Adds any missing default account and saves if something was added.
    /// Returns whether a save happened.
    pub async fn seed_defaults(&mut self) -> Result<bool> {
        let added = self.ledger.ensure_defaults();
        if added.is_empty() {
            return Ok(false);
        }
        for number in &added {
            info!(account = %number, "seeded default account");
        }
        self.persist().await?;
        Ok(true)
    }

    /// The in-memory ledger, as last saved.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Who is logged in right now.
    pub fn session(&self) -> Session {
        self.session
    }

    /// Logs in when the number exists and the password matches exactly.
    /// A failed attempt leaves the session as it was.
    pub async fn login(&mut self, number: AccountNumber, password: &str) -> Result<&Account> {
        let account = self
            .ledger
            .get(number)
            .ok_or(BankError::AccountNotFound(number))?;
        if !account.password_matches(password) {
            warn!(account = %number, "login rejected");
            return Err(BankError::AuthenticationFailed);
        }
        info!(account = %number, "logged in");
        self.session = Session::LoggedIn(number);
        Ok(account)
    }

    /// Ends the session. Logging out while logged out is a no-op.
    pub fn logout(&mut self) {
        if let Session::LoggedIn(number) = self.session {
            info!(account = %number, "logged out");
        }
        self.session = Session::LoggedOut;
    }

    /// The logged-in account, or `NotLoggedIn`.
    pub fn current_account(&self) -> Result<&Account> {
        let number = self.session.current()?;
        self.ledger
            .get(number)
            .ok_or(BankError::AccountNotFound(number))
    }

    /// Deposits into the logged-in account and saves.
    pub async fn deposit(&mut self, amount: i64) -> Result<()> {
        let number = self.session.current()?;
        self.ledger.deposit(number, amount)?;
        info!(account = %number, amount, "deposit");
        self.persist().await
    }

    /// Withdraws from the logged-in account and saves.
    pub async fn withdraw(&mut self, amount: i64) -> Result<()> {
        let number = self.session.current()?;
        self.ledger.withdraw(number, amount)?;
        info!(account = %number, amount, "withdrawal");
        self.persist().await
    }

    /// Withdraws from the logged-in account, then deposits into `destination`.
    /// The two steps are not atomic; see [`Ledger::transfer`].
    pub async fn transfer(&mut self, destination: AccountNumber, amount: i64) -> Result<()> {
        let source = self.session.current()?;
        self.ledger.transfer(source, destination, amount)?;
        info!(from = %source, to = %destination, amount, "transfer");
        self.persist().await
    }

    /// Opens an account under a fresh random number and saves it. A negative
    /// opening balance is refused with `InvalidAmount` and nothing is written.
    pub async fn open_account(
        &mut self,
        name: &str,
        balance: Option<i64>,
        password: Option<String>,
    ) -> Result<AccountNumber> {
        let number = self
            .ledger
            .open_account(name, balance, password, &mut rand::thread_rng())?;
        info!(account = %number, "opened account");
        self.persist().await?;
        Ok(number)
    }

    async fn persist(&self) -> Result<()> {
        self.store.save(&self.ledger).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::default_accounts;
    use crate::infrastructure::in_memory::InMemoryLedgerStore;

    const ROSS: AccountNumber = AccountNumber::new(9502018482);
    const RACHEL: AccountNumber = AccountNumber::new(1945729572);

    async fn open_bank() -> (Bank, InMemoryLedgerStore) {
        let store = InMemoryLedgerStore::new();
        let bank = Bank::open(Box::new(store.clone())).await.unwrap();
        (bank, store)
    }

    #[tokio::test]
    async fn test_open_seeds_empty_store() {
        let (bank, store) = open_bank().await;
        assert_eq!(bank.ledger().len(), 2);
        assert_eq!(store.saves(), 1);
        assert_eq!(store.snapshot().await, *bank.ledger());
    }

    #[tokio::test]
    async fn test_open_does_not_write_when_seeded() {
        let store = InMemoryLedgerStore::with_ledger(Ledger::from_accounts(default_accounts()));
        let mut bank = Bank::open(Box::new(store.clone())).await.unwrap();
        assert_eq!(store.saves(), 0);

        assert!(!bank.seed_defaults().await.unwrap());
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (mut bank, _) = open_bank().await;
        let result = bank.login(ROSS, "0000").await;
        assert!(matches!(result, Err(BankError::AuthenticationFailed)));
        assert_eq!(bank.session(), Session::LoggedOut);
    }

    #[tokio::test]
    async fn test_login_unknown_account() {
        let (mut bank, _) = open_bank().await;
        let missing = AccountNumber::new(1000000000);
        let result = bank.login(missing, "1234").await;
        assert!(matches!(result, Err(BankError::AccountNotFound(n)) if n == missing));
        assert!(!bank.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_login_success_reads_balance() {
        let (mut bank, _) = open_bank().await;
        let account = bank.login(ROSS, "1234").await.unwrap();
        assert_eq!(account.balance, 1350);
        assert_eq!(bank.session(), Session::LoggedIn(ROSS));
    }

    #[tokio::test]
    async fn test_operations_require_login() {
        let (mut bank, store) = open_bank().await;
        assert!(matches!(bank.deposit(10).await, Err(BankError::NotLoggedIn)));
        assert!(matches!(bank.withdraw(10).await, Err(BankError::NotLoggedIn)));
        assert!(matches!(
            bank.transfer(RACHEL, 10).await,
            Err(BankError::NotLoggedIn)
        ));
        assert_eq!(store.saves(), 1);
    }

    #[tokio::test]
    async fn test_every_mutation_is_flushed() {
        let (mut bank, store) = open_bank().await;
        bank.login(ROSS, "1234").await.unwrap();

        bank.deposit(100).await.unwrap();
        assert_eq!(store.saves(), 2);
        bank.withdraw(50).await.unwrap();
        assert_eq!(store.saves(), 3);
        bank.transfer(RACHEL, 500).await.unwrap();
        assert_eq!(store.saves(), 4);

        let saved = store.snapshot().await;
        assert_eq!(saved.get(ROSS).unwrap().balance, 900);
        assert_eq!(saved.get(RACHEL).unwrap().balance, 3950);
    }

    #[tokio::test]
    async fn test_failed_operations_do_not_write() {
        let (mut bank, store) = open_bank().await;
        bank.login(ROSS, "1234").await.unwrap();

        assert!(bank.deposit(0).await.is_err());
        assert!(bank.withdraw(5000).await.is_err());
        assert!(bank.transfer(RACHEL, 2000).await.is_err());
        assert_eq!(store.saves(), 1);
        assert_eq!(bank.current_account().unwrap().balance, 1350);
        assert_eq!(bank.ledger().get(RACHEL).unwrap().balance, 3450);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (mut bank, _) = open_bank().await;
        bank.login(RACHEL, "5678").await.unwrap();
        bank.logout();
        assert_eq!(bank.session(), Session::LoggedOut);
        assert!(matches!(bank.current_account(), Err(BankError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_open_account_is_persisted() {
        let (mut bank, store) = open_bank().await;
        let number = bank
            .open_account("Monica", None, Some("chef".to_string()))
            .await
            .unwrap();

        let saved = store.snapshot().await;
        let monica = saved.get(number).unwrap();
        assert_eq!(monica.name, "Monica");
        assert_eq!(monica.balance, 2000);

        bank.login(number, "chef").await.unwrap();
    }

    #[tokio::test]
    async fn test_open_account_refuses_negative_balance() {
        let (mut bank, store) = open_bank().await;
        let result = bank.open_account("Joey", Some(-500), None).await;
        assert!(matches!(result, Err(BankError::InvalidAmount { amount: -500 })));
        assert_eq!(bank.ledger().len(), 2);
        assert_eq!(store.saves(), 1);
    }

    #[tokio::test]
    async fn test_overflowing_deposit_is_not_saved() {
        let (mut bank, store) = open_bank().await;
        bank.login(ROSS, "1234").await.unwrap();

        let result = bank.deposit(i64::MAX).await;
        assert!(matches!(result, Err(BankError::BalanceOverflow { .. })));
        assert_eq!(bank.current_account().unwrap().balance, 1350);
        assert_eq!(store.saves(), 1);
    }
}
