//! Change tracking and audit logging for Tourdesk
//!
//! # Architecture
//!
//! - `ChangeRecord` / `flatten`: a tree of field edits and array edits, and
//!   the walk that turns it into flat `{path, before, after}` entries.
//! - `compute_changes`: structural diff of two JSON documents into a
//!   `ChangeRecord` tree.
//! - `AuditFilter`: paths left out of stored audit trails.
//! - `AuditEntry` / `AuditLogger`: append-only JSONL log of creates and
//!   updates.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tourdesk::audit::{compute_changes, flatten};
//!
//! let before = json!({"pickup_time": "08:00", "tickets": {"adult": 2}});
//! let after = json!({"pickup_time": "08:30", "tickets": {"adult": 3}});
//!
//! let trail = flatten(&compute_changes(&before, &after), "");
//! assert_eq!(trail[0].path, "pickup_time");
//! assert_eq!(trail[1].path, "tickets.adult");
//! ```

mod change;
mod diff;
mod entry;
mod filter;
mod logger;

pub use change::{flatten, try_flatten, ChangeRecord, FlatChange, PathSegment};
pub use diff::compute_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use filter::AuditFilter;
pub use logger::AuditLogger;
