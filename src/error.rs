use crate::domain::account::AccountNumber;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum BankError {
    #[error("amount must be positive, got {amount}")]
    #[diagnostic(code(banksim::invalid_amount))]
    InvalidAmount { amount: i64 },

    #[error("insufficient funds: requested {requested}, available {available}")]
    #[diagnostic(code(banksim::insufficient_funds))]
    InsufficientFunds { requested: i64, available: i64 },

    #[error("deposit of {amount} would overflow balance {balance}")]
    #[diagnostic(code(banksim::balance_overflow))]
    BalanceOverflow { balance: i64, amount: i64 },

    #[error("account {0} not found")]
    #[diagnostic(code(banksim::account_not_found))]
    AccountNotFound(AccountNumber),

    #[error("account {0} already exists")]
    #[diagnostic(code(banksim::duplicate_account))]
    DuplicateAccount(AccountNumber),

    #[error("incorrect password")]
    #[diagnostic(code(banksim::authentication_failed))]
    AuthenticationFailed,

    #[error("no account is logged in")]
    #[diagnostic(
        code(banksim::not_logged_in),
        help("log in with an account number and password first")
    )]
    NotLoggedIn,

    /// Never surfaced by `load`; kept so the recovery path can be logged.
    #[error("malformed ledger file: {0}")]
    #[diagnostic(code(banksim::malformed_storage))]
    MalformedStorage(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(banksim::io))]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    #[diagnostic(code(banksim::serialization))]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    #[diagnostic(code(banksim::csv))]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BankError>;
