//! Accounts, the ledger that holds them, and the login session.

pub mod account;
pub mod ledger;
pub mod ports;
pub mod session;
