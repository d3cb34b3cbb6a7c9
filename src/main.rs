use banksim::application::bank::Bank;
use banksim::domain::account::AccountNumber;
use banksim::infrastructure::json_file::JsonFileStore;
use banksim::interfaces::csv::account_writer::AccountWriter;
use banksim::interfaces::shell;
use banksim::telemetry;
use clap::{Args, Parser, Subcommand};
use miette::Result;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "A single-machine teller over a JSON ledger", long_about = None)]
struct Cli {
    /// Ledger file. Created on first run.
    #[arg(long, global = true, env = "BANKSIM_LEDGER", default_value = "accounts.json")]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Credentials for the account a command acts on.
#[derive(Args)]
struct Login {
    #[arg(long)]
    account: AccountNumber,
    #[arg(long)]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Create the default accounts if they are missing
    Seed,
    /// Print every account as CSV
    List,
    /// Print `name, account_number, balance` for one account
    Show(Login),
    /// Print the balance of one account
    Balance(Login),
    Deposit {
        #[command(flatten)]
        login: Login,
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
    },
    Withdraw {
        #[command(flatten)]
        login: Login,
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Move funds to another account
    Transfer {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        to: AccountNumber,
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Open an account under a random number
    Open {
        #[arg(long)]
        name: String,
        #[arg(long)]
        balance: Option<i64>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Read teller commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let store = JsonFileStore::new(cli.ledger);
    // Loading also seeds the default accounts.
    let mut bank = Bank::open(Box::new(store)).await?;

    match cli.command {
        Command::Seed => {
            println!("{} accounts", bank.ledger().len());
        }
        Command::List => {
            let stdout = io::stdout();
            let mut writer = AccountWriter::new(stdout.lock());
            writer.write_accounts(bank.ledger().sorted())?;
        }
        Command::Show(login) => {
            bank.login(login.account, &login.password).await?.dump();
        }
        Command::Balance(login) => {
            let account = bank.login(login.account, &login.password).await?;
            println!("{}", account.balance);
        }
        Command::Deposit { login, amount } => {
            bank.login(login.account, &login.password).await?;
            bank.deposit(amount).await?;
            println!("{}", bank.current_account()?.balance);
        }
        Command::Withdraw { login, amount } => {
            bank.login(login.account, &login.password).await?;
            bank.withdraw(amount).await?;
            println!("{}", bank.current_account()?.balance);
        }
        Command::Transfer { login, to, amount } => {
            bank.login(login.account, &login.password).await?;
            bank.transfer(to, amount).await?;
            println!("{}", bank.current_account()?.balance);
        }
        Command::Open {
            name,
            balance,
            password,
        } => {
            let number = bank.open_account(&name, balance, password).await?;
            println!("{number}");
        }
        Command::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            shell::run(&mut bank, stdin.lock(), &mut stdout.lock()).await?;
        }
    }

    bank.logout();
    Ok(())
}
