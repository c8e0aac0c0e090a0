//! Transaction display formatting

use crate::models::Transaction;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, currency: &str) -> String {
    format!(
        "{:<12} {} {:<28} {:>12}  {}",
        txn.id.to_string(),
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.description, 28),
        txn.amount.format_with_symbol(currency),
        txn.user
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:10} {:<28} {:>12}  {}\n",
        "ID", "Date", "Description", "Amount", "User"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency));
        output.push('\n');
    }

    output
}

/// Truncate a string to fit within a given width
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}
