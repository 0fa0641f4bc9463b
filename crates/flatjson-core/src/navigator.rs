//! Key/index navigation over a value tree.
//!
//! [`Navigate`] and [`NavigateMut`] are implemented for values, documents, and
//! for the `Result` a previous step returned, so access chains read like
//! dot/array notation and the first failure short-circuits the rest:
//!
//! ```
//! use flatjson_core::{parse, Navigate};
//! let doc = parse("{ a : [ { b : 'x' }, { b : 'y' } ] }").unwrap();
//! assert_eq!(doc.by_key("a").by_index(1).by_key("b").read_string().unwrap(), "y");
//! assert_eq!(doc.by_path("a[0].b").read_string().unwrap(), "x");
//! ```
//!
//! References borrow the document they came from. A mutable reference is
//! exclusive, so nothing else can reshape the tree between resolving a target
//! and mutating it.

use crate::error::{JsonError, Result};
use crate::value::{key_matches, Document, Value, ValueKind};

/// One step of a textual access path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Look up the first entry whose trimmed key equals `key`.
pub fn child_by_key<'a>(container: &'a Value, key: &str) -> Result<&'a Value> {
    match container {
        Value::Object(entries) => entries
            .iter()
            .find(|(k, _)| key_matches(k, key))
            .map(|(_, v)| v)
            .ok_or_else(|| JsonError::KeyNotFound(key.to_string())),
        Value::Array(_) => Err(JsonError::KeyNotFound(key.to_string())),
        scalar => Err(JsonError::NotAContainer {
            found: scalar.kind(),
        }),
    }
}

pub fn child_by_key_mut<'a>(container: &'a mut Value, key: &str) -> Result<&'a mut Value> {
    match container {
        Value::Object(entries) => entries
            .iter_mut()
            .find(|(k, _)| key_matches(k, key))
            .map(|(_, v)| v)
            .ok_or_else(|| JsonError::KeyNotFound(key.to_string())),
        Value::Array(_) => Err(JsonError::KeyNotFound(key.to_string())),
        scalar => Err(JsonError::NotAContainer {
            found: scalar.kind(),
        }),
    }
}

/// Look up the `index`-th element of an array.
pub fn child_by_index(container: &Value, index: usize) -> Result<&Value> {
    match container {
        Value::Array(items) => items.get(index).ok_or(JsonError::IndexOutOfBounds {
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

pub fn child_by_index_mut(container: &mut Value, index: usize) -> Result<&mut Value> {
    match container {
        Value::Array(items) => {
            let len = items.len();
            items
                .get_mut(index)
                .ok_or(JsonError::IndexOutOfBounds { index, len })
        }
        Value::Object(_) => Err(JsonError::NotAnArray {
            found: ValueKind::Object,
        }),
        scalar => Err(JsonError::NotAContainer {
            found: scalar.kind(),
        }),
    }
}

/// Split a path such as `items[2].name` or `['odd.key'][0]` into segments.
///
/// Bare keys run until the next `.` or `[`. Bracketed segments hold either a
/// decimal index or a key quoted with `"` or `'`. The empty path addresses the
/// value itself.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let invalid = |reason: &str| JsonError::InvalidPath(format!("'{path}': {reason}"));
    let mut segments = Vec::new();
    let mut rest = path;

    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('[') {
            let (segment, after) = match inner.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &inner[1..];
                    let close = body
                        .find(quote)
                        .ok_or_else(|| invalid("unterminated quoted key"))?;
                    let after = body[close + 1..]
                        .strip_prefix(']')
                        .ok_or_else(|| invalid("expected ']' after quoted key"))?;
                    (PathSegment::Key(body[..close].to_string()), after)
                }
                _ => {
                    let close = inner.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                    let index = inner[..close]
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| invalid("index is not a non-negative integer"))?;
                    (PathSegment::Index(index), &inner[close + 1..])
                }
            };
            segments.push(segment);
            rest = after;
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            if end == 0 {
                return Err(invalid("empty key"));
            }
            segments.push(PathSegment::Key(rest[..end].to_string()));
            rest = &rest[end..];
        }

        if let Some(after_dot) = rest.strip_prefix('.') {
            if after_dot.is_empty() || after_dot.starts_with('.') {
                return Err(invalid("empty key"));
            }
            rest = after_dot;
        } else if !rest.is_empty() && !rest.starts_with('[') {
            return Err(invalid("expected '.' or '[' between segments"));
        }
    }

    Ok(segments)
}

/// Read-only navigation. Every step returns a `Result` that is itself navigable.
pub trait Navigate<'a>: Sized {
    /// The value this handle points at, or the error that stopped the chain.
    fn resolve(self) -> Result<&'a Value>;

    fn by_key(self, key: &str) -> Result<&'a Value> {
        child_by_key(self.resolve()?, key)
    }

    fn by_index(self, index: usize) -> Result<&'a Value> {
        child_by_index(self.resolve()?, index)
    }

    /// Follow a textual path (see [`parse_path`]).
    fn by_path(self, path: &str) -> Result<&'a Value> {
        let segments = parse_path(path)?;
        segments
            .iter()
            .try_fold(self.resolve()?, |node, segment| match segment {
                PathSegment::Key(key) => child_by_key(node, key),
                PathSegment::Index(index) => child_by_index(node, *index),
            })
    }

    fn read_int(self) -> Result<i64> {
        self.resolve()?.as_int()
    }

    fn read_double(self) -> Result<f64> {
        self.resolve()?.as_double()
    }

    fn read_bool(self) -> Result<bool> {
        self.resolve()?.as_bool()
    }

    fn read_string(self) -> Result<&'a str> {
        self.resolve()?.as_str()
    }
}

impl<'a> Navigate<'a> for &'a Value {
    fn resolve(self) -> Result<&'a Value> {
        Ok(self)
    }
}

impl<'a> Navigate<'a> for &'a Document {
    fn resolve(self) -> Result<&'a Value> {
        Ok(self.root())
    }
}

impl<'a> Navigate<'a> for Result<&'a Value> {
    fn resolve(self) -> Result<&'a Value> {
        self
    }
}

/// Mutable navigation; the resolved reference can be handed to the mutator.
pub trait NavigateMut<'a>: Sized {
    fn resolve_mut(self) -> Result<&'a mut Value>;

    fn by_key_mut(self, key: &str) -> Result<&'a mut Value> {
        child_by_key_mut(self.resolve_mut()?, key)
    }

    fn by_index_mut(self, index: usize) -> Result<&'a mut Value> {
        child_by_index_mut(self.resolve_mut()?, index)
    }

    fn by_path_mut(self, path: &str) -> Result<&'a mut Value> {
        let segments = parse_path(path)?;
        segments
            .iter()
            .try_fold(self.resolve_mut()?, |node, segment| match segment {
                PathSegment::Key(key) => child_by_key_mut(node, key),
                PathSegment::Index(index) => child_by_index_mut(node, *index),
            })
    }
}

impl<'a> NavigateMut<'a> for &'a mut Value {
    fn resolve_mut(self) -> Result<&'a mut Value> {
        Ok(self)
    }
}

impl<'a> NavigateMut<'a> for &'a mut Document {
    fn resolve_mut(self) -> Result<&'a mut Value> {
        Ok(self.root_mut())
    }
}

impl<'a> NavigateMut<'a> for Result<&'a mut Value> {
    fn resolve_mut(self) -> Result<&'a mut Value> {
        self
    }
}
