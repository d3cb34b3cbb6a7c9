//! Application layer: the teller operations a front end calls.
//!
//! `Bank` owns the loaded ledger, the store it came from and the login
//! session. Each operation runs to completion before the next one starts, and
//! every successful change is written back to the store before returning.

pub mod bank;
