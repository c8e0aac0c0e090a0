//! Change records and their flattening into leaf changes
//!
//! A [`ChangeRecord`] tree describes how one document differs from another:
//! plain edits at a path, and array edits that wrap further records relative
//! to the array's path. [`flatten`] turns the tree into an ordered list of
//! [`FlatChange`]s with dotted paths, which is what audit trails store.
//!
//! Records use the `kind` tags of the `deep-diff` wire format (`E`, `A`), so
//! change lists produced by other services deserialize directly. Any other
//! kind lands in [`ChangeRecord::Unrecognized`].

use std::convert::Infallible;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TourdeskError, TourdeskResult};

/// One step of a field path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A structured modification between two versions of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ChangeRecord {
    /// The value at `path` went from `lhs` to `rhs`
    #[serde(rename = "E")]
    Edit {
        path: Vec<PathSegment>,
        #[serde(default)]
        lhs: Value,
        #[serde(default)]
        rhs: Value,
    },

    /// Changes inside the array at `path`; item paths are relative to it
    #[serde(rename = "A")]
    ArrayEdit {
        path: Vec<PathSegment>,
        #[serde(default)]
        item: Vec<ChangeRecord>,
    },

    /// Any kind this crate does not interpret (additions, deletions, ...)
    #[serde(other)]
    Unrecognized,
}

impl ChangeRecord {
    pub fn edit<P>(path: P, lhs: Value, rhs: Value) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PathSegment>,
    {
        Self::Edit {
            path: path.into_iter().map(Into::into).collect(),
            lhs,
            rhs,
        }
    }

    pub fn array_edit<P>(path: P, item: Vec<ChangeRecord>) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PathSegment>,
    {
        Self::ArrayEdit {
            path: path.into_iter().map(Into::into).collect(),
            item,
        }
    }
}

/// A single leaf change with its full dotted path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatChange {
    pub path: String,
    pub before: Value,
    pub after: Value,
}

impl FlatChange {
    pub fn new(path: impl Into<String>, before: Value, after: Value) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }

    /// One-line description, e.g. `pickup_time: "08:00" -> "08:30"`
    pub fn describe(&self) -> String {
        format!(
            "{}: {} -> {}",
            self.path,
            format_value(&self.before),
            format_value(&self.after)
        )
    }
}

/// Flatten change records into leaf changes, skipping unrecognized kinds
///
/// Paths are `base_path` and each record's own segments joined with `.`.
/// Output follows a depth-first, left-to-right walk of the input. Nesting
/// depth is bounded only by memory: the walk keeps its own stack.
pub fn flatten(changes: &[ChangeRecord], base_path: &str) -> Vec<FlatChange> {
    match walk(changes, base_path, |_| Ok::<(), Infallible>(())) {
        Ok(flat) => flat,
        Err(never) => match never {},
    }
}

/// Like [`flatten`], but fail on the first unrecognized record
///
/// The error carries the path of the array (or the base path) that held the
/// offending record.
pub fn try_flatten(changes: &[ChangeRecord], base_path: &str) -> TourdeskResult<Vec<FlatChange>> {
    walk(changes, base_path, |at| {
        Err(TourdeskError::UnrecognizedChangeKind {
            path: at.to_string(),
        })
    })
}

fn walk<E>(
    changes: &[ChangeRecord],
    base_path: &str,
    mut on_unrecognized: impl FnMut(&str) -> Result<(), E>,
) -> Result<Vec<FlatChange>, E> {
    let mut flat = Vec::new();
    // One shared prefix buffer; each stack level remembers its length.
    let mut prefix = String::from(base_path);
    let mut stack = vec![(changes.iter(), prefix.len())];

    while let Some((records, prefix_len)) = stack.last_mut() {
        prefix.truncate(*prefix_len);
        let Some(record) = records.next() else {
            stack.pop();
            continue;
        };

        match record {
            ChangeRecord::Edit { path, lhs, rhs } => {
                let mut full_path = prefix.clone();
                push_segments(&mut full_path, path);
                flat.push(FlatChange::new(full_path, lhs.clone(), rhs.clone()));
            }
            ChangeRecord::ArrayEdit { path, item } => {
                push_segments(&mut prefix, path);
                stack.push((item.iter(), prefix.len()));
            }
            ChangeRecord::Unrecognized => on_unrecognized(&prefix)?,
        }
    }

    Ok(flat)
}

/// Append a record's own segments, joined by `.`, to a base path
///
/// A non-empty base is always followed by `.`, even when the segments are
/// empty or start with an empty key.
fn push_segments(path: &mut String, segments: &[PathSegment]) {
    if !path.is_empty() {
        path.push('.');
    }
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push('.');
        }
        path.push_str(&segment.to_string());
    }
}

/// Format a JSON value for human-readable display
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edit(path: &[&str], lhs: Value, rhs: Value) -> ChangeRecord {
        ChangeRecord::edit(path.iter().copied(), lhs, rhs)
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[], "").is_empty());
        assert!(try_flatten(&[], "base").unwrap().is_empty());
    }

    #[test]
    fn test_plain_edits_keep_length_and_paths() {
        let changes = vec![
            edit(&["pickup_time"], json!("08:00"), json!("08:30")),
            edit(&["tickets", "adult"], json!(2), json!(3)),
            edit(&["cancelled"], json!(false), json!(true)),
        ];

        let flat = flatten(&changes, "");
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0], FlatChange::new("pickup_time", json!("08:00"), json!("08:30")));
        assert_eq!(flat[1].path, "tickets.adult");
        assert_eq!(flat[2].path, "cancelled");
    }

    #[test]
    fn test_array_edit_prefixes_nested_paths() {
        let changes = vec![ChangeRecord::array_edit(
            ["notes_list"],
            vec![
                ChangeRecord::edit([PathSegment::Index(0)], json!("a"), json!("b")),
                ChangeRecord::edit([PathSegment::Index(2)], Value::Null, json!("c")),
            ],
        )];

        let flat = flatten(&changes, "");
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|c| c.path.starts_with("notes_list.")));
        assert_eq!(flat[0].path, "notes_list.0");
        assert_eq!(flat[1].path, "notes_list.2");
        assert_eq!(flat[1].after, json!("c"));
    }

    #[test]
    fn test_depth_first_order() {
        let changes = vec![
            edit(&["a"], json!(1), json!(2)),
            ChangeRecord::array_edit(
                ["list"],
                vec![
                    ChangeRecord::array_edit([0usize], vec![edit(&["x"], json!(1), json!(2))]),
                    edit(&["1"], json!(3), json!(4)),
                ],
            ),
            edit(&["b"], json!(5), json!(6)),
        ];

        let paths: Vec<_> = flatten(&changes, "").into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["a", "list.0.x", "list.1", "b"]);
    }

    #[test]
    fn test_base_path_prefix() {
        let flat = flatten(&[edit(&["name"], json!("A"), json!("B"))], "booking");
        assert_eq!(flat[0].path, "booking.name");
    }

    #[test]
    fn test_empty_keys_keep_their_separators() {
        let flat = flatten(&[edit(&["", "a"], json!(1), json!(2))], "");
        assert_eq!(flat[0].path, ".a");

        let flat = flatten(&[edit(&["a", ""], json!(1), json!(2))], "booking");
        assert_eq!(flat[0].path, "booking.a.");

        let changes = vec![ChangeRecord::array_edit(
            Vec::<PathSegment>::new(),
            vec![edit(&["x"], json!(1), json!(2))],
        )];
        assert_eq!(flatten(&changes, "base")[0].path, "base..x");
        assert_eq!(flatten(&changes, "")[0].path, "x");
    }

    #[test]
    fn test_repeated_paths_are_kept() {
        let changes = vec![
            edit(&["count"], json!(1), json!(2)),
            edit(&["count"], json!(2), json!(3)),
        ];
        let flat = flatten(&changes, "");
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].path, flat[1].path);
    }

    #[test]
    fn test_unrecognized_kinds() {
        let changes: Vec<ChangeRecord> = serde_json::from_value(json!([
            {"kind": "N", "path": ["notes"], "rhs": "new"},
            {"kind": "E", "path": ["count"], "lhs": 1, "rhs": 2},
            {"kind": "A", "path": ["codes"], "item": [{"kind": "D", "path": [0], "lhs": "X"}]}
        ]))
        .unwrap();

        assert_eq!(changes[0], ChangeRecord::Unrecognized);

        let flat = flatten(&changes, "");
        assert_eq!(flat, vec![FlatChange::new("count", json!(1), json!(2))]);

        let err = try_flatten(&changes[1..], "").unwrap_err();
        match err {
            TourdeskError::UnrecognizedChangeKind { path } => assert_eq!(path, "codes"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let mut record = edit(&["leaf"], json!(0), json!(1));
        for _ in 0..50_000 {
            record = ChangeRecord::array_edit([0usize], vec![record]);
        }

        let flat = flatten(std::slice::from_ref(&record), "");
        assert_eq!(flat.len(), 1);
        assert!(flat[0].path.ends_with(".0.leaf"));

        // Dropping a deep tree recurses; unwind it iteratively.
        let mut current = Some(record);
        while let Some(ChangeRecord::ArrayEdit { mut item, .. }) = current {
            current = item.pop();
        }
    }

    #[test]
    fn test_describe() {
        let change = FlatChange::new("pickup_time", json!("08:00"), Value::Null);
        assert_eq!(change.describe(), "pickup_time: \"08:00\" -> null");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1})), "{1 fields}");
        assert!(format_value(&json!("a".repeat(80))).ends_with("...\""));
    }
}
