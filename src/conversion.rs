//! Bound conversions from captured text to [`Value`]s.
//!
//! A [`Conversion`] carries every parameter it needs (the list delimiter, the
//! integer radix), so the matcher invokes all of them the same way.

use num_bigint::BigInt;

use crate::error::{Result, ScanError};
use crate::value::Value;

/// How the digits of an integer field are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    /// Base 16, with an optional `0x`/`0X` prefix.
    Hex,
    /// Base 8, with an optional `0o`/`0O` prefix.
    Octal,
    /// Base 2, with an optional `0b`/`0B` prefix.
    Binary,
    /// Base picked from the prefix (`0x`, `0o`, `0b`), decimal otherwise.
    Auto,
}

impl Radix {
    fn target(self) -> &'static str {
        match self {
            Radix::Decimal => "decimal integer",
            Radix::Hex => "hexadecimal integer",
            Radix::Octal => "octal integer",
            Radix::Binary => "binary integer",
            Radix::Auto => "integer",
        }
    }
}

/// Element type of a `%[...]` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItem {
    Word,
    Int(Radix),
    Float,
}

impl ListItem {
    fn convert(self, text: &str) -> Result<Value> {
        match self {
            ListItem::Word => Ok(Value::Str(text.to_string())),
            ListItem::Int(radix) => parse_int(text, radix).map(Value::Int),
            ListItem::Float => parse_float(text).map(Value::Float),
        }
    }
}

/// A conversion bound to the parameters of the directive that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Char,
    Text,
    Int(Radix),
    Float,
    /// Split on `delimiter` (trimming each element) or on whitespace runs.
    List {
        item: ListItem,
        delimiter: Option<char>,
    },
}

impl Conversion {
    pub fn convert(&self, text: &str) -> Result<Value> {
        match *self {
            Conversion::Char => text
                .chars()
                .next()
                .map(Value::Char)
                .ok_or_else(|| ScanError::conversion(text, "character")),
            Conversion::Text => Ok(Value::Str(text.to_string())),
            Conversion::Int(radix) => parse_int(text, radix).map(Value::Int),
            Conversion::Float => parse_float(text).map(Value::Float),
            Conversion::List { item, delimiter } => {
                let pieces: Vec<&str> = match delimiter {
                    Some(d) => text.split(d).map(str::trim).collect(),
                    None => text.split_whitespace().collect(),
                };
                pieces
                    .into_iter()
                    .map(|piece| item.convert(piece))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List)
            }
        }
    }
}

/// Parse an optionally signed integer literal in `radix`.
pub fn parse_int(text: &str, radix: Radix) -> Result<BigInt> {
    let fail = || ScanError::conversion(text, radix.target());

    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (base, digits) = match radix {
        Radix::Decimal => (10, unsigned),
        Radix::Hex => (16, strip_radix_prefix(unsigned, 'x').unwrap_or(unsigned)),
        Radix::Octal => (8, strip_radix_prefix(unsigned, 'o').unwrap_or(unsigned)),
        Radix::Binary => (2, strip_radix_prefix(unsigned, 'b').unwrap_or(unsigned)),
        Radix::Auto => [('x', 16), ('o', 8), ('b', 2)]
            .into_iter()
            .find_map(|(marker, base)| strip_radix_prefix(unsigned, marker).map(|d| (base, d)))
            .unwrap_or((10, unsigned)),
    };
    // parse_bytes also takes a sign and `_` separators; only bare digits get through.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return Err(fail());
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), base).ok_or_else(fail)?;
    Ok(if negative { -magnitude } else { magnitude })
}

pub fn parse_float(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ScanError::conversion(text, "float"))
}

/// Strip a `0x`-style prefix whose marker letter matches case-insensitively.
fn strip_radix_prefix(s: &str, marker: char) -> Option<&str> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), Some(c)) if c.eq_ignore_ascii_case(&marker) => Some(&s[2..]),
        _ => None,
    }
}
