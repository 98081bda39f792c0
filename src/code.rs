//! Compiled representation of a format string.

use std::fmt;

use regex::Regex;

use crate::conversion::Conversion;

/// A format translated into one regex and the conversions for its captures.
///
/// The i-th conversion consumes the i-th capture group, so
/// `conversions.len() == pattern.captures_len() - 1`.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    pub(crate) format: String,
    pub(crate) collapse_whitespace: bool,
    pub(crate) pattern: Regex,
    pub(crate) conversions: Vec<Conversion>,
}

impl CompiledFormat {
    /// The format string this was compiled from.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn collapse_whitespace(&self) -> bool {
        self.collapse_whitespace
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    /// Number of values produced by a successful match.
    pub fn field_count(&self) -> usize {
        self.conversions.len()
    }
}

impl fmt::Display for CompiledFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern.as_str())
    }
}
