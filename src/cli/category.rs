//! Category CLI commands

use clap::Subcommand;

use crate::error::TourdeskResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category title
        title: String,
        #[arg(short, long, env = "TOURDESK_USER", default_value = "system")]
        user: String,
    },
    /// List all categories
    List,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TourdeskResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Create { title, user } => {
            let category = service.create(&title, &user)?;
            println!("Created category: {}", category.title);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List => {
            let categories = service.list()?;
            if categories.is_empty() {
                println!("No categories found.");
            }
            for category in categories {
                println!("  {:<12}  {}", category.id.to_string(), category.title);
            }
        }
    }

    Ok(())
}
