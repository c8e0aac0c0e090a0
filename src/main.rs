use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use tourdesk::cli::{
    handle_audit_command, handle_booking_command, handle_category_command, handle_diff_command,
    handle_flatten_command, handle_group_command, handle_product_command, handle_tickets_command,
    handle_transaction_command, handle_wallet_command,
};
use tourdesk::config::{Settings, TourdeskPaths};
use tourdesk::logging::init_tracing;
use tourdesk::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tourdesk",
    version,
    about = "Back-office records for a tour operator",
    long_about = "Tourdesk keeps wallets and their transactions, bookings with a \
                  field-level update history, and the tour catalog in plain JSON \
                  files, with an append-only audit log of every change."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Wallet management commands
    #[command(subcommand)]
    Wallet(tourdesk::cli::WalletCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(tourdesk::cli::CategoryCommands),

    /// Wallet transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(tourdesk::cli::TransactionCommands),

    /// Booking commands
    #[command(subcommand)]
    Booking(tourdesk::cli::BookingCommands),

    /// Product catalog commands
    #[command(subcommand)]
    Product(tourdesk::cli::ProductCommands),

    /// Tour group commands
    #[command(subcommand)]
    Group(tourdesk::cli::GroupCommands),

    /// Ticket availability commands
    #[command(subcommand)]
    Tickets(tourdesk::cli::TicketsCommands),

    /// Print the flattened changes between two JSON files
    Diff {
        before: PathBuf,
        after: PathBuf,
        /// Path prefix for every change
        #[arg(long, default_value = "")]
        base: String,
        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Flatten a change-record list read from a JSON file
    Flatten {
        file: PathBuf,
        /// Path prefix for every change
        #[arg(long, default_value = "")]
        base: String,
        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only entries for this record id
        #[arg(short, long)]
        entity: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TourdeskPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);
    debug!(base_dir = %paths.base_dir().display(), "resolved data directory");

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Tourdesk at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'tourdesk wallet create <title>' to create your first wallet.");
        }
        Some(Commands::Config) => {
            println!("Tourdesk Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log level:       {}", settings.log_level);
            println!("  Ignored paths:   {}", settings.audit.ignored_paths.join(", "));
            println!("  Strict kinds:    {}", settings.audit.strict_kinds);
        }
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Booking(cmd)) => handle_booking_command(&storage, &settings, cmd)?,
        Some(Commands::Product(cmd)) => handle_product_command(&storage, cmd)?,
        Some(Commands::Group(cmd)) => handle_group_command(&storage, cmd)?,
        Some(Commands::Tickets(cmd)) => handle_tickets_command(&storage, cmd)?,
        Some(Commands::Diff {
            before,
            after,
            base,
            json,
        }) => handle_diff_command(&before, &after, &base, json)?,
        Some(Commands::Flatten { file, base, json }) => {
            handle_flatten_command(&settings, &file, &base, json)?
        }
        Some(Commands::Audit { limit, entity }) => {
            handle_audit_command(&storage, limit, entity.as_deref())?
        }
        None => {
            println!("Tourdesk - back-office records for a tour operator");
            println!();
            println!("Run 'tourdesk --help' for usage information.");
        }
    }

    Ok(())
}
