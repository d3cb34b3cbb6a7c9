mod common;

use common::{RACHEL, ROSS, balance_of, banksim, ledger_path};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_shell_session() {
    let dir = tempdir().unwrap();
    let ledger = ledger_path(dir.path());

    let script = format!(
        "login {ROSS} 0000\nlogin {ROSS} 1234\ntransfer {RACHEL} 500\ntransfer {RACHEL} 2000\nlogout\ndeposit 5\nquit\n"
    );

    banksim(&ledger)
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("error: incorrect password"))
        .stdout(predicate::str::contains("welcome, Ross (balance: 1350)"))
        .stdout(predicate::str::contains("balance: 850"))
        .stdout(predicate::str::contains("error: insufficient funds"))
        .stdout(predicate::str::contains("error: no account is logged in"));

    assert_eq!(balance_of(&ledger, ROSS), 850);
    assert_eq!(balance_of(&ledger, RACHEL), 3950);
}

#[test]
fn test_shell_rejects_unknown_verbs() {
    let dir = tempdir().unwrap();

    banksim(&ledger_path(dir.path()))
        .arg("shell")
        .write_stdin("help\nfly away\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("commands: login"))
        .stdout(predicate::str::contains("error: unknown command: fly"));
}
