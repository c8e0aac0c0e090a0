//! Change-list commands: `diff`, `flatten` and `audit`

use std::path::Path;

use serde_json::Value;

use crate::audit::{compute_changes, flatten, try_flatten, ChangeRecord, FlatChange};
use crate::config::Settings;
use crate::display::format_changes;
use crate::error::TourdeskResult;
use crate::storage::{read_json_required, Storage};

/// Print the flattened changes that turn one JSON document into another
pub fn handle_diff_command(before: &Path, after: &Path, base: &str, json: bool) -> TourdeskResult<()> {
    let before: Value = read_json_required(before)?;
    let after: Value = read_json_required(after)?;

    let changes = flatten(&compute_changes(&before, &after), base);
    print_changes(&changes, json)
}

/// Flatten a change list read from a file
///
/// Unrecognized change kinds fail the command when `audit.strict_kinds` is
/// set and are skipped otherwise.
pub fn handle_flatten_command(
    settings: &Settings,
    file: &Path,
    base: &str,
    json: bool,
) -> TourdeskResult<()> {
    let records: Vec<ChangeRecord> = read_json_required(file)?;

    let changes = if settings.audit.strict_kinds {
        try_flatten(&records, base)?
    } else {
        flatten(&records, base)
    };
    print_changes(&changes, json)
}

/// Print the most recent audit log entries
pub fn handle_audit_command(storage: &Storage, limit: usize, entity: Option<&str>) -> TourdeskResult<()> {
    let mut entries = match entity {
        Some(id) => storage.audit().read_for_entity(id)?,
        None => storage.audit().read_recent(limit)?,
    };
    let skip = entries.len().saturating_sub(limit);
    entries.drain(..skip);

    if entries.is_empty() {
        println!("No audit entries found.");
    }
    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

fn print_changes(changes: &[FlatChange], json: bool) -> TourdeskResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(changes)?);
    } else {
        print!("{}", format_changes(changes));
    }
    Ok(())
}
