//! Wallet display formatting
//!
//! Formats wallets for terminal output in table and detail views.

use crate::models::{Money, Transaction, Wallet};

use super::transaction::format_transaction_register;

/// Format a list of wallets as a table with a total row
pub fn format_wallet_list(wallets: &[Wallet], currency: &str) -> String {
    if wallets.is_empty() {
        return "No wallets found.".to_string();
    }

    let title_width = wallets
        .iter()
        .map(|w| w.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);
    let user_width = wallets
        .iter()
        .map(|w| w.user.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<title_width$}  {:<user_width$}  {:>14}\n",
        "ID",
        "Title",
        "User",
        "Balance",
        title_width = title_width,
        user_width = user_width,
    ));
    let separator = format!(
        "{:-<12}  {:-<title_width$}  {:-<user_width$}  {:->14}\n",
        "",
        "",
        "",
        "",
        title_width = title_width,
        user_width = user_width,
    );
    output.push_str(&separator);

    for wallet in wallets {
        output.push_str(&format!(
            "{:<12}  {:<title_width$}  {:<user_width$}  {:>14}\n",
            wallet.id.to_string(),
            wallet.title,
            wallet.user,
            wallet.balance.format_with_symbol(currency),
            title_width = title_width,
            user_width = user_width,
        ));
    }

    let total: Money = wallets.iter().map(|w| w.balance).sum();
    output.push_str(&separator);
    output.push_str(&format!(
        "{:<12}  {:<title_width$}  {:<user_width$}  {:>14}\n",
        "TOTAL",
        "",
        "",
        total.format_with_symbol(currency),
        title_width = title_width,
        user_width = user_width,
    ));

    output
}

/// Format a single wallet with its transactions
pub fn format_wallet_details(wallet: &Wallet, transactions: &[Transaction], currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Wallet: {}\n", wallet.title));
    output.push_str(&format!("  ID:      {}\n", wallet.id));
    output.push_str(&format!("  User:    {}\n", wallet.user));
    output.push_str(&format!(
        "  Balance: {}\n",
        wallet.balance.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Updated: {}\n",
        wallet.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push('\n');
    output.push_str(&format_transaction_register(transactions, currency));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_wallet_list(&[], "€"), "No wallets found.");
    }

    #[test]
    fn test_list_has_total() {
        let wallets = vec![
            Wallet::new("Office cash", "maria", Money::from_units(100)),
            Wallet::new("Fuel card", "nikos", Money::from_cents(-2550)),
        ];
        let output = format_wallet_list(&wallets, "€");

        assert!(output.contains("Office cash"));
        assert!(output.contains("-€25.50"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("€74.50"));
    }

    #[test]
    fn test_details() {
        let wallet = Wallet::new("Guides float", "eleni", Money::from_units(40));
        let output = format_wallet_details(&wallet, &[], "€");

        assert!(output.starts_with("Wallet: Guides float"));
        assert!(output.contains("Balance: €40.00"));
        assert!(output.contains("No transactions found."));
    }
}
