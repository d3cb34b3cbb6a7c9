#![allow(dead_code)]

use assert_cmd::cargo_bin;
use std::path::{Path, PathBuf};

pub const ROSS: &str = "9502018482";
pub const RACHEL: &str = "1945729572";

pub fn ledger_path(dir: &Path) -> PathBuf {
    dir.join("accounts.json")
}

/// The binary, pointed at `ledger` and with logging silenced.
pub fn banksim(ledger: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo_bin!("banksim"));
    cmd.arg("--ledger").arg(ledger).env("RUST_LOG", "off");
    cmd
}

pub fn read_ledger(path: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(path).expect("ledger file should exist");
    serde_json::from_str(&raw).expect("ledger file should be valid JSON")
}

pub fn balance_of(path: &Path, account: &str) -> i64 {
    read_ledger(path)["accounts"][account]["balance"]
        .as_i64()
        .expect("account should have a balance")
}
