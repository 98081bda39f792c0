//! Batch extraction: apply one format to every line of a text and collect
//! the fields into columns.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use crate::code::CompiledFormat;
use crate::compiler::compile;
use crate::error::Result;
use crate::value::Value;

/// One column per captured field, one entry per matching line.
pub type Columns = Vec<Vec<Value>>;

/// Extract columns from every line of `text` that matches `format`.
///
/// Lines that do not match are skipped. If no line matches, the result is
/// empty.
pub fn extract(format: &str, text: &str) -> Result<Columns> {
    let compiled = compile(format, true)?;
    collect_columns(&compiled, text.lines().map(Ok::<_, io::Error>))
}

/// Like [`extract`], reading lines from `reader`.
pub fn extract_reader<R: BufRead>(format: &str, reader: R) -> Result<Columns> {
    let compiled = compile(format, true)?;
    collect_columns(&compiled, reader.lines())
}

/// Like [`extract`], reading lines from the file at `path`.
pub fn extract_file(format: &str, path: impl AsRef<Path>) -> Result<Columns> {
    let file = File::open(path)?;
    extract_reader(format, BufReader::new(file))
}

/// Apply `compiled` to each line and append the fields of matching lines.
pub fn collect_columns<I, S>(compiled: &CompiledFormat, lines: I) -> Result<Columns>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut columns = Columns::new();
    for (number, line) in lines.into_iter().enumerate() {
        let line = line?;
        let Some(values) = compiled.apply(line.as_ref())? else {
            trace!(line = number + 1, "skipping line that does not match");
            continue;
        };
        if columns.is_empty() {
            columns.resize_with(values.len(), Vec::new);
        }
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }
    Ok(columns)
}
