//! Recursive-descent parser: converts JSON-like text into a [`Document`].
//!
//! The grammar is deliberately looser than RFC 8259:
//!
//! - Keys may be quoted with `"` or `'`, or be a bare run of characters up to `:`
//! - Strings are taken verbatim between matching quotes (no escape processing)
//! - Numbers are an optional `-`, digits, and at most one `.` (none → Int, one → Double)
//! - `true`, `false` and `null` literals
//! - Repeated commas between entries or elements are tolerated
//!
//! # Key design decisions
//!
//! - **Strip first**: all whitespace outside quotes is removed before parsing, so
//!   every offset reported in a [`ParseError`] refers to the stripped text.
//! - **Span capture**: the value dispatcher classifies a value by its leading byte
//!   and captures its full extent (`quoted_span` / `balanced_span`) before resolving
//!   it recursively. Objects and arrays share the same balanced-span primitive.
//! - **Recovery**: input whose first non-blank character is not `{` yields an empty
//!   document instead of an error. Any other malformation is an error.
//! - **Bounded recursion**: nesting beyond [`ParserConfig::max_depth`] fails with
//!   [`ParseError::DepthLimitExceeded`].

use crate::error::{ParseError, Result};
use crate::value::{Document, Value};

/// Default nesting limit for [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunables for [`parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum container nesting; the root object counts as depth 1.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a document with the default configuration.
///
/// # Example
/// ```
/// use flatjson_core::{parse, Navigate};
/// let doc = parse("{ name : 'Alice', scores : [95, 87] }").unwrap();
/// assert_eq!(doc.by_key("name").read_string().unwrap(), "Alice");
/// ```
pub fn parse(text: &str) -> Result<Document> {
    parse_with(text, &ParserConfig::default())
}

/// Parse a document, honouring `config`.
pub fn parse_with(text: &str, config: &ParserConfig) -> Result<Document> {
    log::debug!("parsing document ({} bytes)", text.len());

    let body = text.trim_start();
    match body.chars().next() {
        None => return Ok(Document::new()),
        Some('{') => {}
        Some(other) => {
            log::warn!("input starts with '{other}' instead of '{{'; returning an empty document");
            return Ok(Document::new());
        }
    }

    // Anything after the root's closing brace is never stripped or scanned.
    let root_text = match root_extent(body) {
        Some(end) => {
            let trailing = body[end..].trim();
            if !trailing.is_empty() {
                log::warn!(
                    "ignoring {} bytes of trailing input after the root object",
                    trailing.len()
                );
            }
            &body[..end]
        }
        None => body,
    };

    let stripped = strip_unquoted_whitespace(root_text)?;
    let parser = Parser::new(&stripped, config.max_depth);
    let end = parser.balanced_span(0, stripped.len())?;
    let root = parser.parse_value(0, end, 0)?;
    Ok(Document::from(root))
}

/// Offset one past the `}` closing the object that opens `text`, skipping
/// quoted runs. `None` when the braces or quotes never balance; the strict
/// scan over the stripped text then reports where.
fn root_extent(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            },
        }
    }
    None
}

/// Parse a single value (string, number, bool, null, array or object).
///
/// Used to turn command-line or user-supplied literals into [`Value`]s with the
/// same grammar as document values. The whole input must be consumed.
pub fn parse_value(text: &str) -> Result<Value> {
    parse_value_with(text, &ParserConfig::default())
}

pub fn parse_value_with(text: &str, config: &ParserConfig) -> Result<Value> {
    let stripped = strip_unquoted_whitespace(text)?;
    let parser = Parser::new(&stripped, config.max_depth);
    let end = parser.value_end(0, stripped.len())?;
    if end < stripped.len() {
        return Err(parser.unexpected(end).into());
    }
    parser.parse_value(0, end, 0)
}

/// Remove every whitespace character that is not inside a quoted string.
fn strip_unquoted_whitespace(text: &str) -> std::result::Result<String, ParseError> {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    for c in text.chars() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {}
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    if quote.is_some() {
        return Err(ParseError::UnexpectedEndOfInput {
            position: out.len(),
        });
    }
    Ok(out)
}

/// Which numeric variant a run of characters selects, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    Int,
    Double,
}

/// Optional leading `-`, then digits with at most one `.`; at least one digit.
fn classify_number(text: &str) -> Option<NumberKind> {
    let body = text.strip_prefix('-').unwrap_or(text);
    let mut dots = 0;
    let mut digits = 0;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return None,
        }
    }
    match (digits, dots) {
        (0, _) => None,
        (_, 0) => Some(NumberKind::Int),
        (_, 1) => Some(NumberKind::Double),
        _ => None,
    }
}

/// Forward-only scanner over whitespace-stripped input.
///
/// All methods take absolute byte offsets; `limit` is the exclusive bound of the
/// enclosing container's content so that scans never run past its closing
/// delimiter. Every delimiter is ASCII, so offsets produced by scanning for one
/// are always valid `str` boundaries.
struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, max_depth: usize) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            max_depth,
        }
    }

    fn unexpected(&self, position: usize) -> ParseError {
        match self.src.get(position..).and_then(|rest| rest.chars().next()) {
            Some(found) => ParseError::UnexpectedCharacter { found, position },
            None => ParseError::UnexpectedEndOfInput { position },
        }
    }

    /// Offset one past the quote that closes the quote at `start`.
    fn quoted_span(&self, start: usize, limit: usize) -> std::result::Result<usize, ParseError> {
        let quote = self.bytes[start];
        self.bytes[start + 1..limit]
            .iter()
            .position(|&b| b == quote)
            .map(|offset| start + 1 + offset + 1)
            .ok_or(ParseError::UnexpectedEndOfInput { position: limit })
    }

    /// Offset one past the delimiter that closes the `{` or `[` at `start`.
    ///
    /// Depth rises on the opener and falls on its partner; quoted text is
    /// skipped whole so delimiters inside strings are not counted.
    fn balanced_span(&self, start: usize, limit: usize) -> std::result::Result<usize, ParseError> {
        let (open, close) = match self.bytes[start] {
            b'{' => (b'{', b'}'),
            b'[' => (b'[', b']'),
            _ => return Err(self.unexpected(start)),
        };
        let mut depth = 0usize;
        let mut i = start;
        while i < limit {
            let b = self.bytes[i];
            if b == b'"' || b == b'\'' {
                i = self.quoted_span(i, limit)?;
                continue;
            }
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            i += 1;
        }
        Err(ParseError::UnexpectedEndOfInput { position: limit })
    }

    /// Decide how far the value starting at `start` extends.
    fn value_end(&self, start: usize, limit: usize) -> std::result::Result<usize, ParseError> {
        if start >= limit {
            return Err(ParseError::UnexpectedEndOfInput { position: start });
        }
        match self.bytes[start] {
            b'"' | b'\'' => self.quoted_span(start, limit),
            b'{' | b'[' => self.balanced_span(start, limit),
            _ => Ok(self.bytes[start..limit]
                .iter()
                .position(|&b| b == b',')
                .map_or(limit, |offset| start + offset)),
        }
    }

    /// Resolve the captured span `start..end` into a value.
    ///
    /// `depth` is the nesting level of the enclosing container (0 at the top).
    fn parse_value(&self, start: usize, end: usize, depth: usize) -> Result<Value> {
        let text = &self.src[start..end];
        let Some(&lead) = self.bytes.get(start).filter(|_| start < end) else {
            return Err(ParseError::InvalidValue {
                text: String::new(),
                position: start,
            }
            .into());
        };

        match lead {
            b'"' | b'\'' => Ok(Value::String(text[1..text.len() - 1].to_string())),
            b'{' => self.parse_object(start, end, self.descend(depth)?),
            b'[' => self.parse_array(start, end, self.descend(depth)?),
            _ => Ok(parse_primitive(text, start)?),
        }
    }

    fn descend(&self, depth: usize) -> std::result::Result<usize, ParseError> {
        let next = depth + 1;
        if next > self.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(next)
    }

    /// Parse `{ entry (, entry)* }` where `end - 1` is the closing brace.
    fn parse_object(&self, start: usize, end: usize, depth: usize) -> Result<Value> {
        let limit = end - 1;
        let mut entries = Vec::new();
        let mut i = start + 1;

        loop {
            i = self.skip_commas(i, limit);
            if i >= limit {
                break;
            }

            let (key, colon) = self.read_key(i, limit)?;
            let value_start = colon + 1;
            let value_end = self.value_end(value_start, limit)?;
            let value = self.parse_value(value_start, value_end, depth)?;
            log::trace!("entry '{key}' ({}) at offset {i}", value.kind());
            entries.push((key, value));

            i = value_end;
            if i < limit && self.bytes[i] != b',' {
                return Err(self.unexpected(i).into());
            }
        }

        Ok(Value::Object(entries))
    }

    /// Parse `[ value (, value)* ]` where `end - 1` is the closing bracket.
    fn parse_array(&self, start: usize, end: usize, depth: usize) -> Result<Value> {
        let limit = end - 1;
        let mut items = Vec::new();
        let mut i = start + 1;

        loop {
            i = self.skip_commas(i, limit);
            if i >= limit {
                break;
            }

            let value_end = self.value_end(i, limit)?;
            items.push(self.parse_value(i, value_end, depth)?);

            i = value_end;
            if i < limit && self.bytes[i] != b',' {
                return Err(self.unexpected(i).into());
            }
        }

        Ok(Value::Array(items))
    }

    fn skip_commas(&self, mut i: usize, limit: usize) -> usize {
        while i < limit && self.bytes[i] == b',' {
            i += 1;
        }
        i
    }

    /// Read a quoted or bare key starting at `start`.
    ///
    /// Returns the key and the offset of the `:` that follows it.
    fn read_key(&self, start: usize, limit: usize) -> std::result::Result<(String, usize), ParseError> {
        let (key, after) = match self.bytes[start] {
            b'"' | b'\'' => {
                let end = self.quoted_span(start, limit)?;
                (self.src[start + 1..end - 1].to_string(), end)
            }
            _ => {
                let colon = self.bytes[start..limit]
                    .iter()
                    .position(|&b| b == b':')
                    .map(|offset| start + offset)
                    .ok_or(ParseError::UnexpectedEndOfInput { position: limit })?;
                (self.src[start..colon].to_string(), colon)
            }
        };

        if after >= limit {
            return Err(ParseError::UnexpectedEndOfInput { position: after });
        }
        if self.bytes[after] != b':' {
            return Err(self.unexpected(after));
        }
        Ok((key, after))
    }
}

/// Parse a bare token: `true`, `false`, `null` or a number.
fn parse_primitive(text: &str, position: usize) -> std::result::Result<Value, ParseError> {
    match text {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }

    let invalid_number = || ParseError::InvalidNumber {
        text: text.to_string(),
        position,
    };
    match classify_number(text) {
        Some(NumberKind::Int) => text.parse::<i64>().map(Value::Int).map_err(|_| invalid_number()),
        Some(NumberKind::Double) => text
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| invalid_number()),
        None => Err(ParseError::InvalidValue {
            text: text.to_string(),
            position,
        }),
    }
}
