//! Single-pass compiler from format strings to [`CompiledFormat`]s.
//!
//! The format is scanned left to right. At each position the directive table
//! is tried in order; the first directive recognized contributes its fragment
//! and, if it captures, a conversion. Anything else is one literal character.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::cache;
use crate::code::CompiledFormat;
use crate::conversion::Conversion;
use crate::directive::{self, Directive, Param};
use crate::error::{Result, ScanError};

/// Compile `format`, reusing the process-wide cache.
///
/// With `collapse_whitespace`, each run of whitespace in the format matches
/// any non-empty run of whitespace in the input.
pub fn compile(format: &str, collapse_whitespace: bool) -> Result<Arc<CompiledFormat>> {
    cache::get_or_compile(format, collapse_whitespace)
}

impl CompiledFormat {
    /// Compile `format` without consulting the cache.
    pub fn new(format: &str, collapse_whitespace: bool) -> Result<Self> {
        let (source, conversions) = translate(format, collapse_whitespace);
        let pattern = Regex::new(&source).map_err(|source| ScanError::Compile {
            format: format.to_string(),
            source,
        })?;
        debug_assert_eq!(pattern.captures_len() - 1, conversions.len());
        debug!(
            format,
            pattern = pattern.as_str(),
            fields = conversions.len(),
            "compiled format"
        );
        Ok(Self {
            format: format.to_string(),
            collapse_whitespace,
            pattern,
            conversions,
        })
    }
}

/// Translate `format` into regex source text and its conversions.
pub fn translate(format: &str, collapse_whitespace: bool) -> (String, Vec<Conversion>) {
    let mut compiler = Compiler {
        input: format,
        pos: 0,
        collapse_whitespace,
        pattern: String::new(),
        conversions: Vec::new(),
        in_whitespace: false,
    };
    compiler.run();
    (compiler.pattern, compiler.conversions)
}

struct Compiler<'a> {
    input: &'a str,
    pos: usize,
    collapse_whitespace: bool,
    pattern: String,
    conversions: Vec<Conversion>,
    /// The last thing emitted was a collapsed whitespace run.
    in_whitespace: bool,
}

impl Compiler<'_> {
    fn run(&mut self) {
        while let Some(c) = self.input[self.pos..].chars().next() {
            let recognized = directive::recognize(&self.input[self.pos..]).and_then(
                |(directive, len, param)| {
                    let group = directive.render(param)?;
                    Some((directive, len, param, group))
                },
            );
            match recognized {
                Some((directive, len, param, group)) => {
                    self.emit_directive(directive, param, &group);
                    self.pos += len;
                }
                None => {
                    self.emit_literal(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn emit_directive(&mut self, directive: &Directive, param: Param, group: &str) {
        if self.pattern.is_empty()
            && let Some(guard) = directive.field.leading_guard()
        {
            self.pattern.push_str(guard);
        }
        if directive.captures() {
            self.conversions.extend(directive.field.conversion(param));
        }
        self.pattern.push_str(group);
        self.in_whitespace = false;
    }

    fn emit_literal(&mut self, c: char) {
        if self.collapse_whitespace && c.is_whitespace() {
            if !self.in_whitespace {
                self.pattern.push_str(r"\s+");
                self.in_whitespace = true;
            }
            return;
        }
        self.pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        self.in_whitespace = false;
    }
}
