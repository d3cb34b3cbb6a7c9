use super::account::AccountNumber;
use crate::error::{BankError, Result};

/// Who is currently using the teller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(AccountNumber),
}

impl Session {
    /// The logged-in account, or `NotLoggedIn`.
    pub fn current(&self) -> Result<AccountNumber> {
        match self {
            Session::LoggedIn(number) => Ok(*number),
            Session::LoggedOut => Err(BankError::NotLoggedIn),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }
}
