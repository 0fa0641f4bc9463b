//! # flatjson-core
//!
//! A self-contained JSON-like document model with a hand-written parser,
//! dot/array-notation navigation, in-place mutation and a flat serializer.
//!
//! The grammar is JSON-like rather than RFC 8259: keys may be bare words,
//! strings may use `'` or `"` and are taken verbatim, and input that does not
//! open with `{` parses to an empty document.
//!
//! ## Quick start
//!
//! ```rust
//! use flatjson_core::{parse, serialize, Mutate, Navigate, NavigateMut};
//!
//! let mut doc = parse("{ name : 'Alice', scores : [95, 87, 92] }").unwrap();
//! assert_eq!(doc.by_key("scores").by_index(2).read_int().unwrap(), 92);
//!
//! doc.by_path_mut("scores[0]").update(100).unwrap();
//! doc.remove_entry("name").unwrap();
//! assert_eq!(serialize(&doc).unwrap(), r#"{"scores" : [100, 87, 92]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tree and the owning `Document`
//! - [`parser`]: text → `Document`
//! - [`navigator`]: `by_key` / `by_index` / `by_path` access chains
//! - [`mutator`]: update, insert, rename and remove operations
//! - [`serializer`]: `Document` → flat text
//! - [`error`]: error kinds shared by every operation
//! - [`interop`]: conversions to and from `serde_json::Value`

pub mod error;
pub mod interop;
pub mod mutator;
pub mod navigator;
pub mod parser;
pub mod serializer;
pub mod value;

pub use error::{JsonError, ParseError};
pub use mutator::{remove_first_found_anywhere, Mutate};
pub use navigator::{parse_path, Navigate, NavigateMut, PathSegment};
pub use parser::{parse, parse_value, parse_with, ParserConfig};
pub use serializer::{serialize, serialize_value};
pub use value::{Document, Value, ValueKind};
