use crate::error::{BankError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Password given to an account when none is supplied.
pub const DEFAULT_PASSWORD: &str = "1234";

/// Opening balance of an account created without an explicit one.
pub const DEFAULT_OPENING_BALANCE: i64 = 2000;

/// A 10-digit customer account number.
///
/// This is the unique key of the ledger. Generated numbers are drawn uniformly
/// from `[MIN, MAX]`; numbers read from storage are taken as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(u64);

impl AccountNumber {
    pub const MIN: u64 = 1_000_000_000;
    pub const MAX: u64 = 9_999_999_999;

    /// Wraps a number as-is; no digit-count check.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Draws a random 10-digit number. Does not look at existing accounts.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for AccountNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single customer's record.
///
/// The balance is a whole currency amount. It never goes below zero through
/// `withdraw`, but nothing else re-checks that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub account_number: AccountNumber,
    pub balance: i64,
    /// Stored and compared in plain text.
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        account_number: AccountNumber,
        balance: i64,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account_number,
            balance,
            password: password.into(),
        }
    }

    /// Creates an account with a random number, the default opening balance and
    /// the default password.
    pub fn with_random_number<R: Rng>(name: impl Into<String>, rng: &mut R) -> Self {
        Self::new(
            name,
            AccountNumber::generate(rng),
            DEFAULT_OPENING_BALANCE,
            DEFAULT_PASSWORD,
        )
    }

    /// Adds `amount` to the balance. There is no business limit; only a sum
    /// that does not fit in an `i64` is refused, leaving the balance as it was.
    pub fn deposit(&mut self, amount: i64) -> Result<()> {
        self.balance = self.balance_after_deposit(amount)?;
        Ok(())
    }

    /// The balance a deposit of `amount` would produce, without applying it.
    pub fn balance_after_deposit(&self, amount: i64) -> Result<i64> {
        if amount <= 0 {
            return Err(BankError::InvalidAmount { amount });
        }
        self.balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow {
                balance: self.balance,
                amount,
            })
    }

    /// Removes `amount` from the balance if it is covered.
    pub fn withdraw(&mut self, amount: i64) -> Result<()> {
        if amount <= 0 {
            return Err(BankError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Exact, case-sensitive comparison.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    /// Prints `name, account_number, balance` to stdout.
    pub fn dump(&self) {
        println!("{self}");
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.account_number, self.balance)
    }
}
