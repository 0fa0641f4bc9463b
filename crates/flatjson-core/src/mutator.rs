//! In-place updates and removals over a value tree.
//!
//! The free functions take a reference already resolved by the navigator; the
//! [`Mutate`] trait exposes the same operations on any navigation handle so a
//! resolve-then-mutate chain reads as one step:
//!
//! ```
//! use flatjson_core::{parse, Mutate, Navigate, NavigateMut};
//! let mut doc = parse("{ array : [1, 2, 'word'] }").unwrap();
//! doc.by_key_mut("array").by_index_mut(1).update(42).unwrap();
//! assert_eq!(doc.by_key("array").by_index(1).read_int().unwrap(), 42);
//! ```

use crate::error::{JsonError, Result};
use crate::navigator::{child_by_index_mut, child_by_key_mut, parse_path, NavigateMut, PathSegment};
use crate::value::{key_matches, Document, Value, ValueKind};

/// Overwrite a leaf's variant and payload.
///
/// Containers are restructured only through insert/remove, so both the target
/// and the replacement must be scalars; otherwise the call fails with
/// [`JsonError::TypeMismatch`] and the tree is left untouched.
pub fn update(target: &mut Value, new_value: impl Into<Value>) -> Result<()> {
    let new_value = new_value.into();
    if target.is_container() {
        return Err(JsonError::TypeMismatch {
            expected: new_value.kind(),
            found: target.kind(),
        });
    }
    if new_value.is_container() {
        return Err(JsonError::TypeMismatch {
            expected: target.kind(),
            found: new_value.kind(),
        });
    }
    log::debug!("update {} -> {}", target.kind(), new_value.kind());
    *target = new_value;
    Ok(())
}

/// Remove the first entry whose trimmed key equals `key`, returning its value.
pub fn remove_entry(container: &mut Value, key: &str) -> Result<Value> {
    let entries = object_entries_mut(container, key)?;
    let position = entries
        .iter()
        .position(|(k, _)| key_matches(k, key))
        .ok_or_else(|| JsonError::KeyNotFound(key.to_string()))?;
    log::debug!("remove entry '{key}' at position {position}");
    Ok(entries.remove(position).1)
}

/// Remove the `index`-th array element, shifting later elements down.
pub fn remove_by_index(container: &mut Value, index: usize) -> Result<Value> {
    match container {
        Value::Array(items) if index < items.len() => {
            log::debug!("remove element {index}");
            Ok(items.remove(index))
        }
        Value::Array(items) => Err(JsonError::IndexOutOfBounds {
            index,
            len: items.len(),
        }),
        Value::Object(_) => Err(JsonError::NotAnArray {
            found: ValueKind::Object,
        }),
        scalar => Err(JsonError::NotAContainer {
            found: scalar.kind(),
        }),
    }
}

/// Remove exactly one entry named `key` from anywhere in the document.
///
/// The search is a pre-order depth-first walk from the root: each entry's key
/// is checked before its value is descended into, and siblings are visited left
/// to right. Array elements are searched too, in order.
pub fn remove_first_found_anywhere(document: &mut Document, key: &str) -> Result<Value> {
    remove_first_in(document.root_mut(), key).ok_or_else(|| JsonError::KeyNotFound(key.to_string()))
}

fn remove_first_in(node: &mut Value, key: &str) -> Option<Value> {
    match node {
        Value::Object(entries) => {
            for i in 0..entries.len() {
                if key_matches(&entries[i].0, key) {
                    log::debug!("remove first '{key}' found during search");
                    return Some(entries.remove(i).1);
                }
                if let Some(found) = remove_first_in(&mut entries[i].1, key) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter_mut().find_map(|item| remove_first_in(item, key)),
        _ => None,
    }
}

/// Remove whatever the textual `path` addresses: an entry when its last segment
/// is a key, an element when it is an index.
pub fn remove_at_path(root: &mut Value, path: &str) -> Result<Value> {
    let mut segments = parse_path(path)?;
    let last = segments
        .pop()
        .ok_or_else(|| JsonError::InvalidPath("cannot remove the root".to_string()))?;
    let parent = segments
        .iter()
        .try_fold(root, |node, segment| match segment {
            PathSegment::Key(key) => child_by_key_mut(node, key),
            PathSegment::Index(index) => child_by_index_mut(node, *index),
        })?;
    match last {
        PathSegment::Key(key) => remove_entry(parent, &key),
        PathSegment::Index(index) => remove_by_index(parent, index),
    }
}

/// Append an entry to an object. Duplicate keys are allowed.
pub fn insert(container: &mut Value, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
    match container {
        Value::Object(entries) => {
            entries.push((key.into(), value.into()));
            Ok(())
        }
        other => Err(JsonError::TypeMismatch {
            expected: ValueKind::Object,
            found: other.kind(),
        }),
    }
}

/// Append an element to an array.
pub fn push(container: &mut Value, value: impl Into<Value>) -> Result<()> {
    match container {
        Value::Array(items) => {
            items.push(value.into());
            Ok(())
        }
        other => Err(JsonError::TypeMismatch {
            expected: ValueKind::Array,
            found: other.kind(),
        }),
    }
}

/// Rename the first entry whose trimmed key equals `old`, keeping its position.
pub fn rename_key(container: &mut Value, old: &str, new: impl Into<String>) -> Result<()> {
    let entries = object_entries_mut(container, old)?;
    let entry = entries
        .iter_mut()
        .find(|(k, _)| key_matches(k, old))
        .ok_or_else(|| JsonError::KeyNotFound(old.to_string()))?;
    entry.0 = new.into();
    log::debug!("rename entry '{old}' -> '{}'", entry.0);
    Ok(())
}

/// Key-addressed access on an array reports the key as missing, as lookup does.
fn object_entries_mut<'a>(
    container: &'a mut Value,
    key: &str,
) -> Result<&'a mut Vec<(String, Value)>> {
    match container {
        Value::Object(entries) => Ok(entries),
        Value::Array(_) => Err(JsonError::KeyNotFound(key.to_string())),
        scalar => Err(JsonError::NotAContainer {
            found: scalar.kind(),
        }),
    }
}

/// Mutation on any mutable navigation handle.
pub trait Mutate<'a>: NavigateMut<'a> {
    fn update(self, new_value: impl Into<Value>) -> Result<()> {
        crate::mutator::update(self.resolve_mut()?, new_value)
    }

    fn remove_entry(self, key: &str) -> Result<Value> {
        crate::mutator::remove_entry(self.resolve_mut()?, key)
    }

    fn remove_by_index(self, index: usize) -> Result<Value> {
        crate::mutator::remove_by_index(self.resolve_mut()?, index)
    }

    /// Pre-order search confined to the subtree this handle resolves to.
    fn remove_first_found(self, key: &str) -> Result<Value> {
        remove_first_in(self.resolve_mut()?, key)
            .ok_or_else(|| JsonError::KeyNotFound(key.to_string()))
    }

    fn remove_at_path(self, path: &str) -> Result<Value> {
        crate::mutator::remove_at_path(self.resolve_mut()?, path)
    }

    fn insert(self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        crate::mutator::insert(self.resolve_mut()?, key, value)
    }

    fn push(self, value: impl Into<Value>) -> Result<()> {
        crate::mutator::push(self.resolve_mut()?, value)
    }

    fn rename_key(self, old: &str, new: impl Into<String>) -> Result<()> {
        crate::mutator::rename_key(self.resolve_mut()?, old, new)
    }
}

impl<'a, T: NavigateMut<'a>> Mutate<'a> for T {}
