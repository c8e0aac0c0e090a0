//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_transaction_register;
use crate::error::{TourdeskError, TourdeskResult};
use crate::services::{CategoryService, CreateTransactionInput, TransactionService, WalletService};
use crate::storage::Storage;

use super::wallet::parse_amount;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction against a wallet
    Add {
        /// Wallet title or ID
        wallet: String,
        /// Signed amount, negative for money out (e.g. "-30")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category title or ID
        #[arg(short, long)]
        category: String,
        /// What the money was for
        #[arg(short = 'm', long)]
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long, env = "TOURDESK_USER", default_value = "system")]
        user: String,
    },
    /// List transactions
    List {
        /// Only transactions of this wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// Number of most recent transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TourdeskResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            wallet,
            amount,
            category,
            description,
            date,
            user,
        } => {
            let wallet = WalletService::new(storage).require(&wallet)?;
            let category = CategoryService::new(storage).require(&category)?;
            let amount = parse_amount(&amount)?;
            let date = date.as_deref().map(parse_date).transpose()?;

            let txn = service.create(CreateTransactionInput {
                wallet: wallet.id,
                category: category.id,
                user,
                amount,
                date,
                description,
            })?;

            let wallet = storage.wallets.require(&wallet.id)?;
            println!("Recorded transaction: {}", txn.id);
            println!("  Amount:  {}", txn.amount.format_with_symbol(currency));
            println!(
                "  Wallet:  {} (balance {})",
                wallet.title,
                wallet.balance.format_with_symbol(currency)
            );
        }

        TransactionCommands::List { wallet, limit } => {
            let transactions = match wallet {
                Some(wallet) => {
                    let wallet = WalletService::new(storage).require(&wallet)?;
                    service.list_by_wallet(wallet.id)?
                }
                None => service.list()?,
            };
            let skip = transactions.len().saturating_sub(limit);
            print!(
                "{}",
                format_transaction_register(&transactions[skip..], currency)
            );
        }
    }

    Ok(())
}

fn parse_date(input: &str) -> TourdeskResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        TourdeskError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })
}
