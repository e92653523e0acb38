//! Flat JSON objects of primitive values.
//!
//! The payload of a payment request is a single-level JSON object whose values
//! are strings, numbers, booleans or `null`. This module writes such objects
//! and reads them back without a general-purpose JSON stack:
//!
//! - [`to_string`] emits `{"k1":v1,"k2":v2}` in insertion order, quoting and
//!   escaping text.
//! - [`parse`] reads the same shape back, inferring each value's type.
//!
//! Nested objects and arrays are never written and are not understood by the
//! parser; a `[` or `{` in value position is read as a bare token.

use std::fmt::{self, Display, Formatter, Write as _};
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex"));

/// A primitive value held by a [`FieldMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A whole number. Written unquoted; the parser never produces it.
    Integer(i64),
    /// A decimal number, as inferred by the parser.
    Number(f64),
    /// A string.
    Text(String),
}

impl Value {
    /// Returns the text if this is a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Integer`].
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Display for Value {
    /// Writes the value the way it appears in a serialized object.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write_quoted(f, s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// An insertion-ordered mapping from key to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Vec<(String, Value)>);

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Display for FieldMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_quoted(f, key)?;
            write!(f, ":{value}")?;
        }
        f.write_char('}')
    }
}

fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Serializes `map` as a flat JSON object.
#[must_use]
pub fn to_string(map: &FieldMap) -> String {
    map.to_string()
}

/// The input is not a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A required token was missing.
    #[error("expected {expected} at byte {position}")]
    Expected {
        /// What the parser was looking for.
        expected: &'static str,
        /// Byte offset into the input.
        position: usize,
    },
    /// A quoted string ran to the end of the input.
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    /// A backslash was followed by something other than a known escape.
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    /// Something other than whitespace followed the closing brace.
    #[error("unexpected trailing characters at byte {0}")]
    TrailingCharacters(usize),
}

/// Parses a flat JSON object.
///
/// Values are typed by the first rule that matches:
///
/// 1. `null` in any case becomes [`Value::Null`];
/// 2. `true` / `false` in any case become [`Value::Bool`];
/// 3. a token matching `-?\d+(\.\d+)?` becomes [`Value::Number`];
/// 4. a quoted string becomes [`Value::Text`], un-escaped;
/// 5. any other bare token becomes [`Value::Text`] verbatim.
///
/// When a key repeats, the last value wins.
///
/// # Errors
///
/// Returns [`SyntaxError`] if the input is not a single flat object.
pub fn parse(input: &str) -> Result<FieldMap, SyntaxError> {
    let mut parser = Parser { src: input, pos: 0 };
    let map = parser.object()?;
    parser.skip_ws();
    if parser.pos < input.len() {
        return Err(SyntaxError::TrailingCharacters(parser.pos));
    }
    Ok(map)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start_matches([' ', '\t', '\n', '\r']).len();
        self.pos += skipped;
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), SyntaxError> {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(SyntaxError::Expected {
                expected,
                position: self.pos,
            })
        }
    }

    fn object(&mut self) -> Result<FieldMap, SyntaxError> {
        self.expect('{', "'{'")?;
        let mut map = FieldMap::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(map);
        }
        loop {
            self.skip_ws();
            if self.peek() != Some('"') {
                return Err(SyntaxError::Expected {
                    expected: "quoted key",
                    position: self.pos,
                });
            }
            let key = self.quoted()?;
            self.expect(':', "':'")?;
            let value = self.value()?;
            map.insert(key, value);

            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(map);
                }
                _ => {
                    return Err(SyntaxError::Expected {
                        expected: "',' or '}'",
                        position: self.pos,
                    });
                }
            }
        }
    }

    fn value(&mut self) -> Result<Value, SyntaxError> {
        self.skip_ws();
        if self.peek() == Some('"') {
            return self.quoted().map(Value::Text);
        }
        let start = self.pos;
        let len = self.rest().find([',', '}']).unwrap_or(self.rest().len());
        self.pos += len;
        let token = self.src[start..self.pos].trim_end();
        if token.is_empty() {
            return Err(SyntaxError::Expected {
                expected: "value",
                position: start,
            });
        }
        Ok(infer(token))
    }

    /// Reads a quoted string starting at the opening quote.
    fn quoted(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        let mut out = String::new();
        let mut chars = self.src[start + 1..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos = start + 1 + i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let at = start + 1 + i;
                    let escaped = match chars.next() {
                        Some((_, '"')) => '"',
                        Some((_, '\\')) => '\\',
                        Some((_, 'n')) => '\n',
                        Some((_, 'r')) => '\r',
                        Some((_, 't')) => '\t',
                        Some(_) => return Err(SyntaxError::InvalidEscape(at)),
                        None => break,
                    };
                    out.push(escaped);
                }
                c => out.push(c),
            }
        }
        Err(SyntaxError::UnterminatedString(start))
    }
}

fn infer(token: &str) -> Value {
    if token.eq_ignore_ascii_case("null") {
        Value::Null
    } else if token.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if token.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else if NUMBER.is_match(token) {
        token
            .parse()
            .map_or_else(|_| Value::Text(token.to_owned()), Value::Number)
    } else {
        Value::Text(token.to_owned())
    }
}
