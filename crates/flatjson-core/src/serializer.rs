//! Flat-text serializer: renders a value tree on a single line.
//!
//! Output shape is `{"key" : value, "key" : [v, v]}`: one space on each side of
//! `:`, one after `,`, no trailing newline. Every choice here keeps the output
//! inside the parser's grammar, so `parse(serialize(doc))` rebuilds an equal tree:
//!
//! - **Strings and keys** are always quoted, with `"` unless the text itself
//!   contains `"`, in which case `'` is used. Text holding both quote characters
//!   cannot be written and is reported as [`JsonError::Unrepresentable`].
//! - **Doubles** always carry a `.` (`1.0`, not `1`) so they read back as doubles.
//!   Rust's float `Display` never emits exponents. NaN and infinities are
//!   unrepresentable.
//! - **Booleans** render as `true`/`false`, **Null** as `null`.
//! - **Nesting** deeper than [`DEFAULT_MAX_DEPTH`] (the root container counts as
//!   1) is unrepresentable, since [`crate::parse`] would reject the output.
//!
//! # Example
//! ```
//! use flatjson_core::{parse, serialize};
//! let doc = parse("{ a : 1, b : [true, 2.5, 'x'] }").unwrap();
//! assert_eq!(serialize(&doc).unwrap(), r#"{"a" : 1, "b" : [true, 2.5, "x"]}"#);
//! ```

use crate::error::{JsonError, Result};
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::value::{Document, Value};

/// Serialize a whole document.
pub fn serialize(document: &Document) -> Result<String> {
    serialize_value(document.root())
}

/// Serialize any value, including scalars, on its own.
pub fn serialize_value(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_value(value, &mut out, 0)?;
    Ok(out)
}

/// Dispatch on the variant and append its text to `out`.
///
/// `depth` is the nesting level of the enclosing container (0 at the top).
fn write_value(value: &Value, out: &mut String, depth: usize) -> Result<()> {
    if value.is_container() && depth >= DEFAULT_MAX_DEPTH {
        return Err(JsonError::Unrepresentable(format!(
            "nesting deeper than {DEFAULT_MAX_DEPTH} levels"
        )));
    }
    match value {
        Value::Null => out.push_str("null"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Double(n) => write_double(*n, out)?,
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::String(s) => write_quoted(s, out)?,
        Value::Array(items) => write_array(items, out, depth + 1)?,
        Value::Object(entries) => write_object(entries, out, depth + 1)?,
    }
    Ok(())
}

fn write_object(entries: &[(String, Value)], out: &mut String, depth: usize) -> Result<()> {
    out.push('{');
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_quoted(key, out)?;
        out.push_str(" : ");
        write_value(value, out, depth)?;
    }
    out.push('}');
    Ok(())
}

fn write_array(items: &[Value], out: &mut String, depth: usize) -> Result<()> {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(item, out, depth)?;
    }
    out.push(']');
    Ok(())
}

fn write_double(n: f64, out: &mut String) -> Result<()> {
    if !n.is_finite() {
        return Err(JsonError::Unrepresentable(format!("non-finite double {n}")));
    }
    let text = n.to_string();
    out.push_str(&text);
    if !text.contains('.') {
        out.push_str(".0");
    }
    Ok(())
}

/// Pick a delimiter the text does not contain; strings are never escaped.
fn write_quoted(text: &str, out: &mut String) -> Result<()> {
    let quote = match (text.contains('"'), text.contains('\'')) {
        (false, _) => '"',
        (true, false) => '\'',
        (true, true) => {
            return Err(JsonError::Unrepresentable(format!(
                "string containing both quote characters: {text}"
            )))
        }
    };
    out.push(quote);
    out.push_str(text);
    out.push(quote);
    Ok(())
}
