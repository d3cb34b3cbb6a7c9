use super::account::{Account, AccountNumber, DEFAULT_OPENING_BALANCE, DEFAULT_PASSWORD};
use crate::error::{BankError, Result};
use rand::Rng;
use std::collections::HashMap;

/// Accounts that must exist on every start.
pub fn default_accounts() -> [Account; 2] {
    [
        Account::new("Ross", AccountNumber::new(9502018482), 1350, "1234"),
        Account::new("Rachel", AccountNumber::new(1945729572), 3450, "5678"),
    ]
}

/// All accounts, keyed by account number.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ledger {
    accounts: HashMap<AccountNumber, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger keyed by each account's own number. A later account
    /// with the same number replaces an earlier one.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.account_number, account))
                .collect(),
        }
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether `number` is a key of the ledger.
    pub fn contains(&self, number: AccountNumber) -> bool {
        self.accounts.contains_key(&number)
    }

    /// Looks an account up by number.
    pub fn get(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    pub fn get_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(&number)
    }

    fn require_mut(&mut self, number: AccountNumber) -> Result<&mut Account> {
        self.accounts
            .get_mut(&number)
            .ok_or(BankError::AccountNotFound(number))
    }

    /// Accounts in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts ordered by account number.
    pub fn sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|account| account.account_number);
        accounts
    }

    /// Adds an account under its own number, refusing to overwrite.
    pub fn insert(&mut self, account: Account) -> Result<()> {
        if self.contains(account.account_number) {
            return Err(BankError::DuplicateAccount(account.account_number));
        }
        self.accounts.insert(account.account_number, account);
        Ok(())
    }

    /// Opens an account under a fresh random number.
    ///
    /// Numbers already in the ledger are redrawn. A negative opening balance
    /// is refused; zero is allowed.
    pub fn open_account<R: Rng>(
        &mut self,
        name: impl Into<String>,
        balance: Option<i64>,
        password: Option<String>,
        rng: &mut R,
    ) -> Result<AccountNumber> {
        let balance = balance.unwrap_or(DEFAULT_OPENING_BALANCE);
        if balance < 0 {
            return Err(BankError::InvalidAmount { amount: balance });
        }
        let mut number = AccountNumber::generate(rng);
        while self.contains(number) {
            number = AccountNumber::generate(rng);
        }
        let account = Account::new(
            name,
            number,
            balance,
            password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        );
        self.accounts.insert(number, account);
        Ok(number)
    }

    /// Inserts whichever default accounts are missing and returns their
    /// numbers. Existing accounts are left untouched.
    pub fn ensure_defaults(&mut self) -> Vec<AccountNumber> {
        let mut added = Vec::new();
        for account in default_accounts() {
            let number = account.account_number;
            if !self.contains(number) {
                self.accounts.insert(number, account);
                added.push(number);
            }
        }
        added
    }

    /// Deposits into `number`, or `AccountNotFound`.
    pub fn deposit(&mut self, number: AccountNumber, amount: i64) -> Result<()> {
        self.require_mut(number)?.deposit(amount)
    }

    /// Withdraws from `number`, or `AccountNotFound`.
    pub fn withdraw(&mut self, number: AccountNumber, amount: i64) -> Result<()> {
        self.require_mut(number)?.withdraw(amount)
    }

    /// Moves `amount` from `source` to `destination` as two separate steps:
    /// a withdrawal followed by a deposit. Nothing rolls the first step back.
    ///
    /// Both accounts are looked up, and the destination is checked to have
    /// room for the amount, before any balance changes.
    pub fn transfer(
        &mut self,
        source: AccountNumber,
        destination: AccountNumber,
        amount: i64,
    ) -> Result<()> {
        let target = self
            .get(destination)
            .ok_or(BankError::AccountNotFound(destination))?;
        if source != destination {
            target.balance_after_deposit(amount)?;
        }
        self.withdraw(source, amount)?;
        self.deposit(destination, amount)
    }
}
