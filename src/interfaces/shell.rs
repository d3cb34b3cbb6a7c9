//! A line-oriented teller session.
//!
//! Each input line is one verb. Results go to the output; a failed verb prints
//! `error: ...` and the session carries on.

use crate::application::bank::Bank;
use crate::domain::account::AccountNumber;
use crate::error::Result;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;

const HELP: &str = "commands: login <account> <password> | balance | deposit <amount> | \
withdraw <amount> | transfer <account> <amount> | logout | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Login(AccountNumber, String),
    Balance,
    Deposit(i64),
    Withdraw(i64),
    Transfer(AccountNumber, i64),
    Logout,
    Help,
    Quit,
}

fn parse_number(word: Option<&str>) -> std::result::Result<AccountNumber, String> {
    let word = word.ok_or("missing account number")?;
    word.parse()
        .map_err(|_| format!("invalid account number: {word}"))
}

fn parse_amount(word: Option<&str>) -> std::result::Result<i64, String> {
    let word = word.ok_or("missing amount")?;
    word.parse().map_err(|_| format!("invalid amount: {word}"))
}

/// Returns `Ok(None)` for a blank line.
fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match verb.to_ascii_lowercase().as_str() {
        "login" => {
            let number = parse_number(words.next())?;
            let password = words.next().ok_or("missing password")?;
            Command::Login(number, password.to_string())
        }
        "balance" => Command::Balance,
        "deposit" => Command::Deposit(parse_amount(words.next())?),
        "withdraw" => Command::Withdraw(parse_amount(words.next())?),
        "transfer" => {
            let destination = parse_number(words.next())?;
            Command::Transfer(destination, parse_amount(words.next())?)
        }
        "logout" => Command::Logout,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

/// Runs one verb. `Break` means the session should end.
async fn execute<W: Write>(
    bank: &mut Bank,
    command: Command,
    out: &mut W,
) -> Result<ControlFlow<()>> {
    match command {
        Command::Login(number, password) => {
            let account = bank.login(number, &password).await?;
            writeln!(out, "welcome, {} (balance: {})", account.name, account.balance)?;
        }
        Command::Balance => {
            writeln!(out, "balance: {}", bank.current_account()?.balance)?;
        }
        Command::Deposit(amount) => {
            bank.deposit(amount).await?;
            writeln!(out, "balance: {}", bank.current_account()?.balance)?;
        }
        Command::Withdraw(amount) => {
            bank.withdraw(amount).await?;
            writeln!(out, "balance: {}", bank.current_account()?.balance)?;
        }
        Command::Transfer(destination, amount) => {
            bank.transfer(destination, amount).await?;
            writeln!(out, "transferred {amount} to {destination}")?;
            writeln!(out, "balance: {}", bank.current_account()?.balance)?;
        }
        Command::Logout => {
            bank.logout();
            writeln!(out, "logged out")?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(ControlFlow::Break(())),
    }
    Ok(ControlFlow::Continue(()))
}

/// Runs verbs from `input` until `quit` or end of input.
pub async fn run<R: BufRead, W: Write>(bank: &mut Bank, input: R, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let command = match parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                continue;
            }
        };
        match execute(bank, command, out).await {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => {}
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }
    bank.logout();
    out.flush()?;
    Ok(())
}
