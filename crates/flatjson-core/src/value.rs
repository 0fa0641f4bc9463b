//! The dynamically-typed value tree and the `Document` that owns it.
//!
//! Containers own their children outright (`Vec<Value>` / `Vec<(String, Value)>`),
//! so a tree can never alias or cycle. Objects are an ordered list of pairs rather
//! than a map: duplicate keys may be stored, lookups return the first match, and
//! insertion order survives every update and serialization.

use crate::error::{JsonError, Result};
use std::fmt;

/// One node of the tree: a scalar or a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Double(f64),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    /// Key-value entries in insertion order.
    Object(Vec<(String, Value)>),
}

/// The variant tag of a [`Value`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Int,
    Double,
    Bool,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Int => "int",
            ValueKind::Double => "double",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Object keys compare equal once surrounding whitespace is ignored on both sides.
pub(crate) fn key_matches(stored: &str, wanted: &str) -> bool {
    stored.trim() == wanted.trim()
}

impl Value {
    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Vec::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn mismatch(&self, expected: ValueKind) -> JsonError {
        JsonError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Read the payload as an integer. No coercion from other numeric variants.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.mismatch(ValueKind::Int)),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match self {
            Value::Double(n) => Ok(*n),
            other => Err(other.mismatch(ValueKind::Double)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&[(String, Value)]> {
        match self {
            Value::Object(entries) => Ok(entries),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    /// Number of entries or elements; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(entries: Vec<(String, Value)>) -> Self {
        Value::Object(entries)
    }
}

/// A parsed document: exactly one root value plus its ownership boundary.
///
/// References handed out by navigation borrow the document, so the borrow
/// checker keeps a resolve-then-mutate sequence free of interleaved edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// A document whose root is an empty object.
    pub fn new() -> Self {
        Self {
            root: Value::object(),
        }
    }

    /// Parse text with the default [`crate::ParserConfig`].
    pub fn parse(text: &str) -> Result<Self> {
        crate::parser::parse(text)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    /// True when the root holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self { root }
    }
}
