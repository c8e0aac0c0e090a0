//! Structural diff between two JSON documents
//!
//! Produces [`ChangeRecord`] trees that [`flatten`](super::flatten) turns into
//! audit-trail entries. Added and removed object keys are reported as edits
//! with `null` on the missing side, so they survive flattening.

use serde_json::Value;

use super::change::{ChangeRecord, PathSegment};

/// Compute the changes that turn `before` into `after`
///
/// Object keys are visited in `before`'s order, followed by keys that only
/// exist in `after`. Arrays produce one [`ChangeRecord::ArrayEdit`] holding
/// per-index changes with paths relative to the array. Equal documents yield
/// no records.
///
/// Recursion follows the nesting of the documents; values parsed by
/// `serde_json` are limited to 128 levels.
pub fn compute_changes(before: &Value, after: &Value) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    diff_into(before, after, &mut Vec::new(), &mut changes);
    changes
}

fn diff_into(
    before: &Value,
    after: &Value,
    path: &mut Vec<PathSegment>,
    out: &mut Vec<ChangeRecord>,
) {
    if before == after {
        return;
    }

    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                path.push(PathSegment::Key(key.clone()));
                match after_obj.get(key) {
                    Some(after_val) => diff_into(before_val, after_val, path, out),
                    None => out.push(edit_at(path, before_val, &Value::Null)),
                }
                path.pop();
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    path.push(PathSegment::Key(key.clone()));
                    out.push(edit_at(path, &Value::Null, after_val));
                    path.pop();
                }
            }
        }
        (Value::Array(before_arr), Value::Array(after_arr)) => {
            let mut items = Vec::new();
            let mut relative = Vec::new();

            for index in 0..before_arr.len().max(after_arr.len()) {
                relative.push(PathSegment::Index(index));
                match (before_arr.get(index), after_arr.get(index)) {
                    (Some(b), Some(a)) => diff_into(b, a, &mut relative, &mut items),
                    (Some(b), None) => items.push(edit_at(&relative, b, &Value::Null)),
                    (None, Some(a)) => items.push(edit_at(&relative, &Value::Null, a)),
                    (None, None) => {}
                }
                relative.pop();
            }

            if !items.is_empty() {
                out.push(ChangeRecord::ArrayEdit {
                    path: path.clone(),
                    item: items,
                });
            }
        }
        _ => out.push(edit_at(path, before, after)),
    }
}

fn edit_at(path: &[PathSegment], before: &Value, after: &Value) -> ChangeRecord {
    ChangeRecord::Edit {
        path: path.to_vec(),
        lhs: before.clone(),
        rhs: after.clone(),
    }
}
