//! Applying compiled formats to lines of text.

use std::sync::Arc;

use crate::code::CompiledFormat;
use crate::compiler::compile;
use crate::error::Result;
use crate::value::Value;

impl CompiledFormat {
    /// Search `line` for this format and convert the captured fields.
    ///
    /// The match may start anywhere in the line. One trailing line terminator
    /// is ignored. Returns `Ok(None)` when the line does not match.
    pub fn apply(&self, line: &str) -> Result<Option<Vec<Value>>> {
        let line = strip_line_terminator(line);
        let Some(captures) = self.pattern.captures(line) else {
            return Ok(None);
        };
        captures
            .iter()
            .skip(1)
            .zip(&self.conversions)
            .map(|(group, conversion)| conversion.convert(group.map_or("", |m| m.as_str())))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Anything a line can be matched against: a compiled format or a format
/// string, which is compiled through the cache with whitespace collapsing.
pub trait FormatSource {
    fn apply_to(&self, line: &str) -> Result<Option<Vec<Value>>>;
}

impl FormatSource for CompiledFormat {
    fn apply_to(&self, line: &str) -> Result<Option<Vec<Value>>> {
        self.apply(line)
    }
}

impl FormatSource for Arc<CompiledFormat> {
    fn apply_to(&self, line: &str) -> Result<Option<Vec<Value>>> {
        self.as_ref().apply(line)
    }
}

impl FormatSource for str {
    fn apply_to(&self, line: &str) -> Result<Option<Vec<Value>>> {
        compile(self, true)?.apply(line)
    }
}

impl FormatSource for String {
    fn apply_to(&self, line: &str) -> Result<Option<Vec<Value>>> {
        self.as_str().apply_to(line)
    }
}

/// Match `line` against `format`, which may be compiled or a format string.
pub fn apply<F: FormatSource + ?Sized>(format: &F, line: &str) -> Result<Option<Vec<Value>>> {
    format.apply_to(line)
}

/// Compile `format` (cached, collapsing whitespace) and match `line`.
pub fn scanf(format: &str, line: &str) -> Result<Option<Vec<Value>>> {
    scanf_with(format, line, true)
}

/// Like [`scanf`], with explicit whitespace handling.
pub fn scanf_with(
    format: &str,
    line: &str,
    collapse_whitespace: bool,
) -> Result<Option<Vec<Value>>> {
    compile(format, collapse_whitespace)?.apply(line)
}

#[cfg(test)]
mod tests;
