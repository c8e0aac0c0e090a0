//! Wallet CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_wallet_details, format_wallet_list};
use crate::error::{TourdeskError, TourdeskResult};
use crate::models::Money;
use crate::services::{TransactionService, WalletService};
use crate::storage::Storage;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet
    Create {
        /// Wallet title
        title: String,
        /// Opening balance (e.g. "250" or "250.00")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
        /// Owner of the wallet
        #[arg(short, long, env = "TOURDESK_USER", default_value = "system")]
        user: String,
    },
    /// List all wallets
    List,
    /// Show a wallet and its transactions
    Show {
        /// Wallet title or ID
        wallet: String,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(
    storage: &Storage,
    settings: &Settings,
    cmd: WalletCommands,
) -> TourdeskResult<()> {
    let service = WalletService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        WalletCommands::Create {
            title,
            balance,
            user,
        } => {
            let opening = parse_amount(&balance)?;
            let wallet = service.create(&title, &user, opening)?;

            println!("Created wallet: {}", wallet.title);
            println!("  User:    {}", wallet.user);
            println!("  Balance: {}", wallet.balance.format_with_symbol(currency));
            println!("  ID:      {}", wallet.id);
        }

        WalletCommands::List => {
            let wallets = service.list()?;
            print!("{}", format_wallet_list(&wallets, currency));
        }

        WalletCommands::Show { wallet } => {
            let wallet = service.require(&wallet)?;
            let transactions = TransactionService::new(storage).list_by_wallet(wallet.id)?;
            print!("{}", format_wallet_details(&wallet, &transactions, currency));
        }
    }

    Ok(())
}

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> TourdeskResult<Money> {
    Money::parse(input).map_err(|e| {
        TourdeskError::Validation(format!(
            "{}. Use a format like '12.50' or '-30'",
            e
        ))
    })
}
